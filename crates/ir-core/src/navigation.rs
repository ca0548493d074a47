//! Routes and the host surface the report view drives.

use ir_report::ReportRoutes;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Application routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    /// Upload page.
    Home,
    /// Report information form.
    DataForm,
    /// The printable report.
    Report,
}

impl Route {
    /// Path for this route under the configured routes.
    pub fn path<'a>(&self, routes: &'a ReportRoutes) -> &'a str {
        match self {
            Route::Home => &routes.home,
            Route::DataForm => &routes.edit,
            Route::Report => "/report",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => write!(f, "home"),
            Route::DataForm => write!(f, "data_form"),
            Route::Report => write!(f, "report"),
        }
    }
}

/// Report controls shown above the report and excluded from print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// "Print Report".
    Print,
    /// "Edit Info", back to the data form.
    EditInfo,
    /// "Upload New File", back to home.
    UploadNewFile,
}

/// Host capabilities used by the view: navigation and printing.
pub trait ViewHost {
    /// Navigate to a route.
    fn navigate(&mut self, route: Route);

    /// Invoke the host print facility.
    fn print(&mut self);
}

/// Something a [`ViewHost`] was asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// Navigation request.
    Navigated(Route),
    /// Print request.
    Printed,
}

/// Host that records requests instead of acting on them.
#[derive(Debug, Default)]
pub struct RecordingHost {
    events: Vec<HostEvent>,
}

impl RecordingHost {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests in order.
    pub fn events(&self) -> &[HostEvent] {
        &self.events
    }

    /// Last navigation target, if any.
    pub fn last_route(&self) -> Option<Route> {
        self.events.iter().rev().find_map(|e| match e {
            HostEvent::Navigated(route) => Some(*route),
            HostEvent::Printed => None,
        })
    }
}

impl ViewHost for RecordingHost {
    fn navigate(&mut self, route: Route) {
        self.events.push(HostEvent::Navigated(route));
    }

    fn print(&mut self) {
        self.events.push(HostEvent::Printed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_paths() {
        let routes = ReportRoutes::default();
        assert_eq!(Route::Home.path(&routes), "/");
        assert_eq!(Route::DataForm.path(&routes), "/data-form");
        assert_eq!(Route::Report.path(&routes), "/report");
    }

    #[test]
    fn test_recording_host() {
        let mut host = RecordingHost::new();
        host.print();
        host.navigate(Route::DataForm);
        host.print();
        assert_eq!(host.events().len(), 3);
        assert_eq!(host.last_route(), Some(Route::DataForm));
    }
}
