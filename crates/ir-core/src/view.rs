//! Report view: load, consolidate, paginate, render.
//!
//! A view is mounted once against a [`ReportContext`]. Mounting reads both
//! stored values, consolidates the records exactly once and keeps the result
//! for the view's lifetime. Load failures redirect home and leave nothing to
//! render.

use crate::logging::generate_render_id;
use crate::navigation::{Control, Route, ViewHost};
use chrono::{DateTime, Utc};
use ir_common::{FormData, InstallationRecord};
use ir_consolidate::Consolidator;
use ir_report::{EmptyDatasetPolicy, ReportConfig, ReportData, ReportGenerator};
use ir_store::{LoadError, ReportStore, StoreReader};
use tracing::{debug, error, info, info_span, warn};

/// Everything a view needs, passed in explicitly.
#[derive(Clone, Copy)]
pub struct ReportContext<'a> {
    /// Key-value store holding the uploaded records and form data.
    pub store: &'a dyn ReportStore,
    /// Row consolidation applied once at load.
    pub consolidator: &'a dyn Consolidator,
    /// Rendering settings.
    pub config: &'a ReportConfig,
}

/// Why a view navigated away instead of rendering.
#[derive(Debug)]
pub enum RedirectReason {
    /// Stored data missing, malformed, or unreadable.
    Load(LoadError),
    /// Data loaded but consolidated to zero rows under the redirect policy.
    EmptyDataset,
}

impl RedirectReason {
    /// Stable short name for logs and CLI payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            RedirectReason::Load(err) => err.kind(),
            RedirectReason::EmptyDataset => "empty_dataset",
        }
    }
}

impl std::fmt::Display for RedirectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RedirectReason::Load(err) => write!(f, "{}", err),
            RedirectReason::EmptyDataset => write!(f, "no installation records"),
        }
    }
}

/// State held by a mounted view.
#[derive(Debug)]
pub enum ViewState {
    /// Data loaded; at least one consolidated record.
    Ready {
        /// Report form data.
        form: FormData,
        /// Consolidated records.
        records: Vec<InstallationRecord>,
    },
    /// Data loaded but no records remain.
    Empty {
        /// Report form data.
        form: FormData,
    },
    /// The view navigated away during mount.
    Redirected {
        /// Navigation target.
        route: Route,
        /// Cause.
        reason: RedirectReason,
    },
}

/// Result of rendering a mounted view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewOutcome {
    /// Full report.
    Rendered {
        /// Document HTML.
        html: String,
        /// Number of detail table pages.
        detail_pages: usize,
        /// Consolidated record count.
        total_units: usize,
        /// Timestamp stamped into the document.
        generated_at: DateTime<Utc>,
    },
    /// Empty-state page.
    Placeholder {
        /// Document HTML.
        html: String,
    },
    /// Nothing rendered; the view navigated to `route`.
    Redirected {
        /// Navigation target.
        route: Route,
    },
}

impl ViewOutcome {
    /// Rendered HTML, if any.
    pub fn html(&self) -> Option<&str> {
        match self {
            ViewOutcome::Rendered { html, .. } | ViewOutcome::Placeholder { html } => Some(html),
            ViewOutcome::Redirected { .. } => None,
        }
    }
}

/// A mounted report view.
pub struct ReportView {
    render_id: String,
    config: ReportConfig,
    state: ViewState,
}

impl ReportView {
    /// Load and consolidate the stored data.
    ///
    /// On a load failure, or an empty dataset under
    /// [`EmptyDatasetPolicy::Redirect`], navigates `host` to [`Route::Home`].
    pub fn mount(ctx: &ReportContext<'_>, host: &mut dyn ViewHost) -> Self {
        let render_id = generate_render_id();
        let span = info_span!("report_view", render_id = %render_id);
        let _enter = span.enter();

        let state = match StoreReader::new(ctx.store).load() {
            Ok(input) => {
                let raw_rows = input.records.len();
                let records = ctx.consolidator.consolidate(input.records);
                debug!(raw_rows, rows = records.len(), "Records consolidated");

                if !records.is_empty() {
                    ViewState::Ready {
                        form: input.form,
                        records,
                    }
                } else {
                    match ctx.config.empty_dataset {
                        EmptyDatasetPolicy::Placeholder => {
                            info!("No installation records; showing placeholder");
                            ViewState::Empty { form: input.form }
                        }
                        EmptyDatasetPolicy::Redirect => {
                            info!("No installation records; redirecting home");
                            ViewState::Redirected {
                                route: Route::Home,
                                reason: RedirectReason::EmptyDataset,
                            }
                        }
                    }
                }
            }
            Err(err) => {
                match &err {
                    LoadError::Store(_) => {
                        error!(kind = err.kind(), error = %err, "Error loading report data")
                    }
                    _ => warn!(kind = err.kind(), error = %err, "Report data unavailable"),
                }
                ViewState::Redirected {
                    route: Route::Home,
                    reason: RedirectReason::Load(err),
                }
            }
        };

        if let ViewState::Redirected { route, .. } = &state {
            host.navigate(*route);
        }

        Self {
            render_id,
            config: ctx.config.clone(),
            state,
        }
    }

    /// Correlation id for this view load.
    pub fn render_id(&self) -> &str {
        &self.render_id
    }

    /// Current state.
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Render the held state.
    pub fn render(&self) -> ir_report::Result<ViewOutcome> {
        let span = info_span!("report_view", render_id = %self.render_id);
        let _enter = span.enter();

        let generator = ReportGenerator::new(self.config.clone());
        match &self.state {
            ViewState::Ready { form, records } => {
                let data = ReportData::build(form, records, &self.config)?
                    .with_render_id(self.render_id.clone());
                let html = generator.generate(&data)?;
                Ok(ViewOutcome::Rendered {
                    html,
                    detail_pages: data.details.page_count(),
                    total_units: data.details.total_units,
                    generated_at: data.generated_at,
                })
            }
            ViewState::Empty { .. } => Ok(ViewOutcome::Placeholder {
                html: generator.render_placeholder(Some(&self.render_id))?,
            }),
            ViewState::Redirected { route, .. } => Ok(ViewOutcome::Redirected { route: *route }),
        }
    }

    /// Handle a report control.
    pub fn activate(&self, control: Control, host: &mut dyn ViewHost) {
        debug!(render_id = %self.render_id, control = ?control, "Control activated");
        match control {
            Control::Print => host.print(),
            Control::EditInfo => host.navigate(Route::DataForm),
            Control::UploadNewFile => host.navigate(Route::Home),
        }
    }
}
