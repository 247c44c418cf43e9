//! `kbqs users …`: drives the directory page and action dialog against
//! the live admin API.

use std::sync::Arc;

use kbqs_core::card::UserCard;
use kbqs_core::config::ConsoleConfig;
use kbqs_core::dialog::SubmitOutcome;
use kbqs_core::directory::{PageView, UserDirectoryPage};
use kbqs_core::gateway::UserGateway;
use kbqs_core::gateway::http::HttpUserApi;
use kbqs_core::models::user::{UserProfile, UserRecord};
use kbqs_core::validation::{self, Field};

use crate::cli::{AddArgs, EditArgs, PasswordArgs, UsersCommand};
use crate::{Error, Result};

pub async fn run(command: &UsersCommand, config: &ConsoleConfig) -> Result<()> {
    let gateway = UserGateway::new(Arc::new(HttpUserApi::from_config(config)));
    let mut page = UserDirectoryPage::new(gateway.clone());

    match command {
        UsersCommand::List => list(&mut page).await,
        UsersCommand::Add(args) => add(&mut page, args).await,
        UsersCommand::Edit(args) => edit(&mut page, &gateway, args).await,
        UsersCommand::Disable { id } => disable(&mut page, id).await,
        UsersCommand::Password(args) => password(&mut page, args).await,
    }
}

async fn list(page: &mut UserDirectoryPage) -> Result<()> {
    match page.load().await {
        PageView::Ready(cards) if cards.is_empty() => println!("No users found."),
        PageView::Ready(cards) => {
            for card in cards {
                println!("{}", card.summary_line());
            }
        }
        PageView::Error(message) => return Err(Error::Custom(format!("Error: {message}"))),
        PageView::Loading => {}
    }
    Ok(())
}

/// Load the directory and find `id` in it.
async fn find_user(page: &mut UserDirectoryPage, id: &str) -> Result<UserRecord> {
    if let PageView::Error(message) = page.load().await {
        return Err(Error::Custom(format!("Error: {message}")));
    }
    page.card(id)
        .map(|card| card.user().clone())
        .ok_or_else(|| Error::UserNotFound(id.to_string()))
}

async fn add(page: &mut UserDirectoryPage, args: &AddArgs) -> Result<()> {
    page.request_add();
    let (dialog, session) = page.dialog_mut();
    let confirm = args.confirm_password.as_deref().unwrap_or(&args.password);
    dialog.fill_fields(&[
        (Field::FirstName, args.first_name.as_str()),
        (Field::LastName, args.last_name.as_str()),
        (Field::Username, args.username.as_str()),
        (Field::Email, args.email.as_str()),
        (Field::Password, args.password.as_str()),
        (Field::ConfirmPassword, confirm),
    ])?;
    dialog.select_role(args.role);

    match dialog.submit(session).await? {
        SubmitOutcome::Created(user) => {
            println!("Created {}", UserCard::new(user).summary_line());
        }
        SubmitOutcome::Dismissed => {}
    }
    Ok(())
}

async fn edit(page: &mut UserDirectoryPage, gateway: &UserGateway, args: &EditArgs) -> Result<()> {
    let user = find_user(page, &args.id).await?;
    let current = UserProfile::from(&user);
    let profile = UserProfile {
        email: args.email.clone().unwrap_or(current.email.clone()),
        username: args.username.clone().unwrap_or(current.username.clone()),
        first_name: args.first_name.clone().unwrap_or(current.first_name.clone()),
        last_name: args.last_name.clone().unwrap_or(current.last_name.clone()),
        role: args.role.unwrap_or(current.role),
        status: current.status,
    };

    if profile == current {
        log::info!("Nothing to change for user {}", args.id);
        return Ok(());
    }
    validation::validate_profile(&profile).map_err(Error::Validation)?;

    let updated = gateway.update_user(&user.id, &profile).await?;
    println!("Updated {}", UserCard::new(updated).summary_line());
    Ok(())
}

async fn disable(page: &mut UserDirectoryPage, id: &str) -> Result<()> {
    let user = find_user(page, id).await?;
    page.request_edit(&user);
    let (dialog, session) = page.dialog_mut();
    dialog.disable(session).await?;
    println!("Disabled {}", UserCard::new(user).summary_line());
    Ok(())
}

async fn password(page: &mut UserDirectoryPage, args: &PasswordArgs) -> Result<()> {
    let user = find_user(page, &args.id).await?;
    page.request_edit(&user);
    let (dialog, session) = page.dialog_mut();
    let confirm = args.confirm_password.as_deref().unwrap_or(&args.password);
    dialog.fill_fields(&[
        (Field::Password, args.password.as_str()),
        (Field::ConfirmPassword, confirm),
    ])?;
    dialog.change_password(session).await?;
    println!("Password changed for {}", user.username);
    Ok(())
}
