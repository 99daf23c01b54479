//! Shell and Navigation
//!
//! Static route table plus the dashboard's sidebar selection. Panel
//! selection lives in memory only: it is not part of the URL and is lost
//! on reload.

use std::fmt;
use std::str::FromStr;

use crate::session::{Guard, Session, SessionStore};

/// Hint shown while no panel is selected
pub const NO_PANEL_HINT: &str = "Selecione uma funcionalidade no menu à esquerda.";

/// Application pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    SignIn,
    SignUp,
    Dashboard,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::SignIn => "/signin",
            Route::SignUp => "/signup",
            Route::Dashboard => "/dashboard",
        }
    }

    /// Map a path onto the table. `/` and unknown paths go to sign-in.
    pub fn resolve(path: &str) -> Route {
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "/signin" => Route::SignIn,
            "/signup" => Route::SignUp,
            "/dashboard" => Route::Dashboard,
            _ => Route::SignIn,
        }
    }

    /// Whether the page requires a signed-in user
    pub fn is_protected(&self) -> bool {
        matches!(self, Route::Dashboard)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Resolve a path and apply the session guard to protected pages
pub fn navigate<S: SessionStore>(path: &str, session: &Session<S>) -> Route {
    let route = Route::resolve(path);
    if !route.is_protected() {
        return route;
    }
    match session.guard() {
        Guard::Allow(_) => route,
        Guard::Redirect(to) => {
            tracing::debug!(from = %route, to = %to, "Guard redirect");
            to
        }
    }
}

/// Dashboard panels, in sidebar order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelKind {
    Transport,
    Tracking,
    Priorities,
    Incidents,
}

impl PanelKind {
    pub const SIDEBAR: [PanelKind; 4] = [
        PanelKind::Transport,
        PanelKind::Tracking,
        PanelKind::Priorities,
        PanelKind::Incidents,
    ];

    /// Sidebar button and panel heading
    pub fn title(&self) -> &'static str {
        match self {
            PanelKind::Transport => "Agendamento de Transporte",
            PanelKind::Tracking => "Rastreamento de Pacientes",
            PanelKind::Priorities => "Gestão de Prioridades",
            PanelKind::Incidents => "Registro de Incidentes",
        }
    }

    /// Short name used on the command line
    pub fn slug(&self) -> &'static str {
        match self {
            PanelKind::Transport => "requests",
            PanelKind::Tracking => "trackings",
            PanelKind::Priorities => "patients",
            PanelKind::Incidents => "incidents",
        }
    }
}

impl fmt::Display for PanelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for PanelKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        PanelKind::SIDEBAR
            .into_iter()
            .find(|p| p.slug().eq_ignore_ascii_case(wanted) || p.title().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown panel '{}'", wanted))
    }
}

/// In-memory dashboard state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dashboard {
    selected: Option<PanelKind>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, panel: PanelKind) {
        self.selected = Some(panel);
    }

    pub fn selected(&self) -> Option<PanelKind> {
        self.selected
    }

    /// Heading line for the signed-in user
    pub fn greeting(name: &str) -> String {
        format!("Bem-vindo, {}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::User;
    use crate::session::MemoryStore;

    #[test]
    fn test_route_table() {
        assert_eq!(Route::resolve("/signin"), Route::SignIn);
        assert_eq!(Route::resolve("/signup/"), Route::SignUp);
        assert_eq!(Route::resolve("/dashboard"), Route::Dashboard);
        assert_eq!(Route::resolve("/"), Route::SignIn);
        assert_eq!(Route::resolve("/admin"), Route::SignIn);
        assert!(Route::Dashboard.is_protected());
        assert!(!Route::SignUp.is_protected());
    }

    #[test]
    fn test_navigate_applies_guard() {
        let mut session = Session::open(MemoryStore::new());
        assert_eq!(navigate("/dashboard", &session), Route::SignIn);
        assert_eq!(navigate("/signup", &session), Route::SignUp);

        session
            .login(User {
                id: "u1".to_string(),
                name: "Ana".to_string(),
                email: "ana@x.com".to_string(),
                role: "user".to_string(),
            })
            .unwrap();
        assert_eq!(navigate("/dashboard", &session), Route::Dashboard);
    }

    #[test]
    fn test_sidebar_selection() {
        let mut dashboard = Dashboard::new();
        assert_eq!(dashboard.selected(), None);

        dashboard.select(PanelKind::Incidents);
        assert_eq!(dashboard.selected(), Some(PanelKind::Incidents));
        assert_eq!(Dashboard::greeting("Ana"), "Bem-vindo, Ana");
    }

    #[test]
    fn test_panel_parsing() {
        assert_eq!("patients".parse::<PanelKind>(), Ok(PanelKind::Priorities));
        assert_eq!(
            "Registro de Incidentes".parse::<PanelKind>(),
            Ok(PanelKind::Incidents)
        );
        assert!("billing".parse::<PanelKind>().is_err());
        assert_eq!(PanelKind::SIDEBAR[0].title(), "Agendamento de Transporte");
    }
}
