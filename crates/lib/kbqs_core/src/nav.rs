//! Admin console navigation.

/// Top-level admin sections, in sidebar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AdminSection {
    #[default]
    Dashboard,
    Appointments,
    Queueing,
    Analytics,
    Management,
}

impl AdminSection {
    pub const ALL: [AdminSection; 5] = [
        AdminSection::Dashboard,
        AdminSection::Appointments,
        AdminSection::Queueing,
        AdminSection::Analytics,
        AdminSection::Management,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AdminSection::Dashboard => "Dashboard",
            AdminSection::Appointments => "Appointments",
            AdminSection::Queueing => "Queueing",
            AdminSection::Analytics => "Analytics",
            AdminSection::Management => "Management",
        }
    }

    /// Route path of the section.
    pub fn path(&self) -> &'static str {
        match self {
            AdminSection::Dashboard => "/admin/dashboard/",
            AdminSection::Appointments => "/admin/appointments/",
            AdminSection::Queueing => "/admin/queueing/",
            AdminSection::Analytics => "/admin/analytics/",
            AdminSection::Management => "/admin/management/",
        }
    }

    /// Section owning `path`, matched by prefix so sub-pages stay highlighted.
    pub fn from_path(path: &str) -> Option<Self> {
        let normalized = if path.ends_with('/') {
            path.to_string()
        } else {
            format!("{path}/")
        };
        Self::ALL
            .into_iter()
            .find(|s| normalized.starts_with(s.path()))
    }
}

/// Sidebar state: which section is highlighted.
#[derive(Debug, Clone, Default)]
pub struct Navbar {
    active: AdminSection,
}

impl Navbar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> AdminSection {
        self.active
    }

    /// Highlight `section` and return the path to navigate to.
    pub fn select(&mut self, section: AdminSection) -> &'static str {
        self.active = section;
        section.path()
    }

    /// Sync the highlight with the current route; unknown paths leave it as is.
    pub fn sync_with_path(&mut self, path: &str) {
        if let Some(section) = AdminSection::from_path(path) {
            self.active = section;
        }
    }

    /// `(label, path, is_active)` for each entry, in order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &'static str, bool)> + '_ {
        AdminSection::ALL
            .into_iter()
            .map(|s| (s.label(), s.path(), s == self.active))
    }
}
