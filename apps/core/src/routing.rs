//! Static role × tab → view table and the per-role navigation menu.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::auth::Role;
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tab {
    Dashboard,
    Assessment,
    Chat,
    Resources,
    Analytics,
    Booking,
    Appointments,
    Students,
    Users,
    CrisisAlerts,
    PeerChats,
}

impl Tab {
    pub const ALL: [Tab; 11] = [
        Tab::Dashboard,
        Tab::Assessment,
        Tab::Chat,
        Tab::Resources,
        Tab::Analytics,
        Tab::Booking,
        Tab::Appointments,
        Tab::Students,
        Tab::Users,
        Tab::CrisisAlerts,
        Tab::PeerChats,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Tab::Dashboard => "dashboard",
            Tab::Assessment => "assessment",
            Tab::Chat => "chat",
            Tab::Resources => "resources",
            Tab::Analytics => "analytics",
            Tab::Booking => "booking",
            Tab::Appointments => "appointments",
            Tab::Students => "students",
            Tab::Users => "users",
            Tab::CrisisAlerts => "crisis-alerts",
            Tab::PeerChats => "peer-chats",
        }
    }

    /// Translation key of the menu label.
    pub fn label_key(&self) -> &'static str {
        match self {
            Tab::Dashboard => "nav.dashboard",
            Tab::Assessment => "nav.assessment",
            Tab::Chat => "nav.chat",
            Tab::Resources => "nav.resources",
            Tab::Analytics => "nav.analytics",
            Tab::Booking => "nav.booking",
            Tab::Appointments => "nav.appointments",
            Tab::Students => "nav.students",
            Tab::Users => "nav.users",
            Tab::CrisisAlerts => "nav.crisisAlerts",
            Tab::PeerChats => "nav.peerChats",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Tab {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tab::ALL
            .into_iter()
            .find(|tab| tab.id() == s)
            .ok_or_else(|| AppError::InvalidInput(format!("unknown tab '{}'", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    StudentDashboard,
    CounselorDashboard,
    AdminAnalytics,
    VolunteerDashboard,
    Assessment,
    Chat,
    ResourceLibrary,
    CounselorBooking,
    /// Placeholder for tabs without a screen
    ComingSoon,
}

/// The view rendered for `role` with `tab` selected.
pub fn select_view(role: Role, tab: Tab) -> View {
    match (role, tab) {
        (Role::CollegeAdmin | Role::SystemAdmin, _) => View::AdminAnalytics,

        (Role::PeerVolunteer, Tab::Dashboard | Tab::PeerChats) => View::VolunteerDashboard,
        (Role::PeerVolunteer, Tab::Resources) => View::ResourceLibrary,
        (Role::PeerVolunteer, _) => View::ComingSoon,

        (Role::Counselor, Tab::Dashboard | Tab::Appointments | Tab::Students) => {
            View::CounselorDashboard
        }
        (Role::Counselor, Tab::Resources) => View::ResourceLibrary,
        (Role::Counselor, _) => View::ComingSoon,

        (Role::Student, Tab::Dashboard) => View::StudentDashboard,
        (Role::Student, Tab::Assessment) => View::Assessment,
        (Role::Student, Tab::Chat) => View::Chat,
        (Role::Student, Tab::Resources) => View::ResourceLibrary,
        (Role::Student, Tab::Booking) => View::CounselorBooking,
        (Role::Student, _) => View::ComingSoon,
    }
}

/// Tabs shown in the sidebar for `role`, in display order.
pub fn menu_for(role: Role) -> &'static [Tab] {
    match role {
        Role::Student => &[
            Tab::Dashboard,
            Tab::Assessment,
            Tab::Chat,
            Tab::Resources,
            Tab::Booking,
        ],
        Role::Counselor => &[
            Tab::Dashboard,
            Tab::Appointments,
            Tab::Students,
            Tab::Resources,
            Tab::CrisisAlerts,
        ],
        Role::CollegeAdmin | Role::SystemAdmin => &[
            Tab::Dashboard,
            Tab::Analytics,
            Tab::Users,
            Tab::Resources,
            Tab::CrisisAlerts,
        ],
        Role::PeerVolunteer => &[Tab::Dashboard, Tab::PeerChats, Tab::Resources],
    }
}
