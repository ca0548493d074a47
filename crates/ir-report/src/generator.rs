//! Report generator implementation.

use crate::assets::BrandAssets;
use crate::config::ReportConfig;
use crate::error::{ReportError, Result};
use crate::sections::*;

use chrono::{DateTime, Utc};
use ir_common::{ColumnSet, FormData, InstallationRecord};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use tracing::{debug, info};

/// Complete report data structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportData {
    /// Correlation id shared with log lines for this render.
    pub render_id: Option<String>,
    /// Generation timestamp.
    pub generated_at: DateTime<Utc>,
    /// Generator version.
    pub generator_version: String,
    /// Document title override.
    pub title: Option<String>,
    /// Cover page.
    pub cover: CoverSection,
    /// Letter page.
    pub letter: LetterSection,
    /// Detail table pages.
    pub details: DetailsSection,
    /// Summary page.
    pub summary: SummarySection,
}

impl ReportData {
    /// Assemble report sections from form data and consolidated records.
    ///
    /// Columns are derived once from the first record and shared by every
    /// detail page.
    pub fn build(
        form: &FormData,
        records: &[InstallationRecord],
        config: &ReportConfig,
    ) -> Result<Self> {
        config.validate()?;
        let page_size = NonZeroUsize::new(config.limits.rows_per_page).ok_or_else(|| {
            ReportError::InvalidConfig("limits.rows_per_page must be at least 1".to_string())
        })?;

        let branding = &config.branding;
        let columns = ColumnSet::from_first_record(records, config.limits.max_columns);
        let missing = columns.rows_missing_keys(records);
        if missing > 0 {
            debug!(
                rows = missing,
                columns = columns.len(),
                "Rows lack displayed columns; cells left blank"
            );
        }

        Ok(Self {
            render_id: None,
            generated_at: Utc::now(),
            generator_version: env!("CARGO_PKG_VERSION").to_string(),
            title: config.title.clone(),
            cover: CoverSection::from_form(form, &branding.report_title, &config.date_format),
            letter: LetterSection::from_form(
                form,
                &branding.report_title,
                &branding.company_name,
                &config.date_format,
            ),
            details: DetailsSection::build(records, columns, page_size),
            summary: SummarySection::new(records.len(), &branding.company_name),
        })
    }

    /// Attach a render id.
    pub fn with_render_id(mut self, render_id: impl Into<String>) -> Self {
        self.render_id = Some(render_id.into());
        self
    }

    /// Get the report title.
    pub fn title(&self) -> String {
        self.title
            .clone()
            .unwrap_or_else(|| format!("{} - {}", self.cover.report_title, self.cover.client_name))
    }
}

/// Report generator.
pub struct ReportGenerator {
    config: ReportConfig,
}

impl ReportGenerator {
    /// Create a new report generator with configuration.
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Create a generator with default configuration.
    pub fn default_config() -> Self {
        Self::new(ReportConfig::default())
    }

    /// Get the current configuration.
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Render the full report.
    pub fn generate(&self, data: &ReportData) -> Result<String> {
        let assets = self.resolve_assets()?;
        let body = format!(
            "{controls}\n<main class=\"report-container\">\n{cover}\n{letter}\n{details}\n{summary}\n</main>",
            controls = self.generate_controls(),
            cover = self.generate_cover(&data.cover, &assets),
            letter = self.generate_letter(&data.letter, &assets),
            details = self.generate_details(&data.details, &assets),
            summary = self.generate_summary(&data.summary, &assets),
        );
        let html = self.wrap_document(
            &data.title(),
            data.render_id.as_deref(),
            Some(&data.generated_at),
            &body,
        );

        let output = finish(html);
        info!(
            bytes = output.len(),
            title = %data.title(),
            detail_pages = data.details.page_count(),
            total_units = data.details.total_units,
            render_id = data.render_id.as_deref().unwrap_or(""),
            "Report generated"
        );
        Ok(output)
    }

    /// Render the empty-state page shown when no records remain.
    pub fn render_placeholder(&self, render_id: Option<&str>) -> Result<String> {
        let body = format!(
            r##"{controls}
<main class="report-container">
<section id="empty" class="empty-state">
    <p>No data found.</p>
    <p class="muted">Upload an installation file or <a href="{edit}">edit the report information</a>.</p>
</section>
</main>"##,
            controls = self.generate_controls(),
            edit = html_escape(&self.config.routes.edit),
        );
        let title = self
            .config
            .title
            .clone()
            .unwrap_or_else(|| self.config.branding.report_title.clone());
        let output = finish(self.wrap_document(&title, render_id, None, &body));
        info!(bytes = output.len(), "Placeholder generated");
        Ok(output)
    }

    fn resolve_assets(&self) -> Result<BrandAssets> {
        BrandAssets::resolve(
            &self.config.branding,
            &self.config.limits,
            self.config.embed_assets,
        )
    }

    fn wrap_document(
        &self,
        title: &str,
        render_id: Option<&str>,
        generated_at: Option<&DateTime<Utc>>,
        body: &str,
    ) -> String {
        let auto_print = if self.config.auto_print {
            r#"<script>window.addEventListener("load", function () { window.print(); });</script>"#
        } else {
            ""
        };
        let render_meta = render_id
            .map(|id| format!(r#"<meta name="render-id" content="{}">"#, html_escape(id)))
            .unwrap_or_default();
        let generated_meta = generated_at
            .map(|at| format!(r#"<meta name="generated-at" content="{}">"#, at.to_rfc3339()))
            .unwrap_or_default();

        format!(
            r##"<!DOCTYPE html>
<html lang="en" class="{theme_class}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <meta name="generator" content="ir-report {version}">
    <meta name="robots" content="noindex, nofollow">
    {render_meta}
    {generated_meta}
    <style>
        :root {{
            --bg-page: #f3f4f6;
            --bg-sheet: #ffffff;
            --text-primary: #1f2937;
            --text-secondary: #4b5563;
            --border-color: #e5e7eb;
            --accent-color: {accent};
        }}
        .dark {{
            --bg-page: #111827;
            --bg-sheet: #1f2937;
            --text-primary: #f9fafb;
            --text-secondary: #d1d5db;
            --border-color: #374151;
        }}
        @media (prefers-color-scheme: dark) {{
            :root:not(.light) {{
                --bg-page: #111827;
                --bg-sheet: #1f2937;
                --text-primary: #f9fafb;
                --text-secondary: #d1d5db;
                --border-color: #374151;
            }}
        }}
        body {{
            margin: 0;
            padding: 1rem;
            background-color: var(--bg-page);
            color: var(--text-primary);
            font-family: ui-sans-serif, system-ui, sans-serif;
            line-height: 1.5;
        }}
        .controls {{
            display: flex;
            justify-content: flex-end;
            gap: 0.5rem;
            max-width: 56rem;
            margin: 0 auto 1rem;
        }}
        .btn {{
            padding: 0.5rem 1rem;
            border: 1px solid var(--accent-color);
            border-radius: 0.375rem;
            background: var(--accent-color);
            color: #ffffff;
            font: inherit;
            text-decoration: none;
            cursor: pointer;
        }}
        .btn-outline {{
            background: transparent;
            color: var(--accent-color);
        }}
        .report-container {{
            max-width: 56rem;
            margin: 0 auto;
            background: var(--bg-sheet);
            box-shadow: 0 10px 15px rgba(0, 0, 0, 0.1);
        }}
        .report-page {{
            padding: 2rem;
            min-height: 10in;
            display: flex;
            flex-direction: column;
        }}
        .cover-page {{
            align-items: center;
            justify-content: center;
            text-align: center;
        }}
        .cover-page h1 {{ font-size: 3rem; margin-bottom: 1rem; }}
        .cover-page h2 {{ font-size: 1.875rem; color: var(--text-secondary); margin-bottom: 3rem; }}
        .cover-meta {{ margin-top: auto; font-size: 1.25rem; color: var(--text-secondary); }}
        .logo {{ max-width: 200px; height: auto; margin-bottom: 2rem; }}
        .logo-small {{ max-width: 150px; height: auto; }}
        .letterhead {{
            display: flex;
            justify-content: space-between;
            align-items: center;
            margin-bottom: 2rem;
        }}
        .letterhead-contact {{ text-align: right; font-size: 0.875rem; color: var(--text-secondary); }}
        .letterhead-contact p {{ margin: 0; }}
        h1, h2 {{ color: var(--accent-color); }}
        .prose {{ white-space: pre-line; line-height: 1.75; }}
        .signoff {{ margin-top: 4rem; }}
        .signature {{ max-width: 150px; height: auto; margin-bottom: 1rem; }}
        .footer-container {{ margin-top: auto; padding-top: 2rem; }}
        .footer-container img {{ width: 100%; height: auto; }}
        table.details {{
            width: 100%;
            border-collapse: collapse;
            border: 1px solid var(--border-color);
            margin-bottom: 1.5rem;
        }}
        table.details th {{
            background: var(--accent-color);
            color: #ffffff;
            padding: 0.75rem 1rem;
            font-size: 0.875rem;
        }}
        table.details td {{
            padding: 0.75rem 1rem;
            font-size: 0.875rem;
            border-bottom: 1px solid var(--border-color);
        }}
        table.details tbody tr:nth-child(odd) {{ background: rgba(0, 0, 0, 0.03); }}
        .text-left {{ text-align: left; }}
        .text-right {{ text-align: right; font-variant-numeric: tabular-nums; }}
        .text-center {{ text-align: center; }}
        .caption {{
            border-left: 4px solid #60a5fa;
            background: rgba(96, 165, 250, 0.1);
            padding: 1rem;
            font-size: 0.875rem;
        }}
        .stat-grid {{
            display: grid;
            grid-template-columns: repeat(2, minmax(0, 1fr));
            gap: 1.5rem;
            margin-bottom: 2rem;
        }}
        .card {{
            border: 1px solid var(--border-color);
            border-radius: 0.5rem;
            padding: 1.5rem;
            margin-bottom: 1.5rem;
        }}
        .stat-value {{ font-size: 2rem; font-weight: 700; color: var(--accent-color); }}
        .stat-label {{ font-size: 1.125rem; font-weight: 600; margin: 0 0 0.5rem; }}
        .empty-state {{ padding: 6rem 2rem; text-align: center; }}
        .muted {{ color: var(--text-secondary); }}
        /* Print styles */
        @page {{ size: letter; margin: 0.5in; }}
        @media print {{
            .no-print {{ display: none !important; }}
            :root, .dark {{
                --bg-page: #ffffff;
                --bg-sheet: #ffffff;
                --text-primary: #000000;
                --text-secondary: #374151;
            }}
            body {{ padding: 0; font-size: 10pt; }}
            .report-container {{ box-shadow: none; max-width: none; }}
            .report-page {{ break-after: page; page-break-after: always; min-height: auto; }}
            .report-page:last-child {{ break-after: auto; page-break-after: auto; }}
            table.details {{ break-inside: avoid; }}
        }}
    </style>
    {auto_print}
</head>
<body>
{body}
</body>
</html>"##,
            theme_class = self.config.theme.css_class(),
            title = html_escape(title),
            version = env!("CARGO_PKG_VERSION"),
            render_meta = render_meta,
            generated_meta = generated_meta,
            accent = html_escape(&self.config.branding.accent_color),
            auto_print = auto_print,
            body = body,
        )
    }

    fn generate_controls(&self) -> String {
        format!(
            r##"<nav class="controls no-print">
    <button type="button" class="btn" onclick="window.print()">Print Report</button>
    <a class="btn btn-outline" href="{edit}">Edit Info</a>
    <a class="btn btn-outline" href="{home}">Upload New File</a>
</nav>"##,
            edit = html_escape(&self.config.routes.edit),
            home = html_escape(&self.config.routes.home),
        )
    }

    fn generate_cover(&self, cover: &CoverSection, assets: &BrandAssets) -> String {
        format!(
            r##"<section id="cover" class="print-section report-page cover-page">
    {logo}
    <h1>{title}</h1>
    <h2>{client}</h2>
    <div class="cover-meta">
        <p>Prepared By: {prepared_by}</p>
        <p>Date: {date}</p>
    </div>
</section>"##,
            logo = image_tag(assets.logo.as_deref(), "logo", &self.logo_alt()),
            title = html_escape(&cover.report_title),
            client = html_escape(&cover.client_name),
            prepared_by = html_escape(&cover.prepared_by),
            date = html_escape(&cover.report_date),
        )
    }

    fn generate_letter(&self, letter: &LetterSection, assets: &BrandAssets) -> String {
        let branding = &self.config.branding;
        format!(
            r##"<section id="letter" class="print-section report-page letter-page">
    <header class="letterhead">
        {logo}
        <div class="letterhead-contact">
            <p>{company}</p>
            <p>{tagline}</p>
            <p>{email}</p>
        </div>
    </header>
    <p>{date}</p>
    <p>{client}</p>
    <h1>{title}</h1>
    <p class="prose">{introduction}</p>
    <p class="prose">{body}</p>
    <p class="prose">{conclusion}</p>
    <div class="signoff">
        <p>Sincerely,</p>
        <p><strong>{prepared_by}</strong></p>
        {signature}
        <p>{signoff_company}</p>
    </div>
    {footer}
</section>"##,
            logo = image_tag(assets.logo.as_deref(), "logo-small", &self.logo_alt()),
            company = html_escape(&branding.company_name),
            tagline = html_escape(&branding.tagline),
            email = html_escape(&branding.contact_email),
            date = html_escape(&letter.date),
            client = html_escape(&letter.client_name),
            title = html_escape(&letter.report_title),
            introduction = html_escape(&letter.introduction),
            body = html_escape(&letter.body),
            conclusion = html_escape(&letter.conclusion),
            prepared_by = html_escape(&letter.prepared_by),
            signature = image_tag(assets.signature.as_deref(), "signature", "Signature"),
            signoff_company = html_escape(&letter.company_name),
            footer = footer_block(assets),
        )
    }

    fn generate_details(&self, details: &DetailsSection, assets: &BrandAssets) -> String {
        let header_cells: String = details
            .columns
            .iter()
            .map(|c| {
                format!(
                    r#"<th class="{}">{}</th>"#,
                    c.display.align_class(),
                    html_escape(&c.key)
                )
            })
            .collect::<Vec<_>>()
            .join("");

        let align: Vec<&'static str> = details
            .columns
            .iter()
            .map(|c| c.display.align_class())
            .collect();

        details
            .pages
            .iter()
            .map(|page| {
                let rows: String = page
                    .rows
                    .iter()
                    .map(|cells| {
                        let tds: String = cells
                            .iter()
                            .zip(align.iter())
                            .map(|(cell, class)| {
                                format!(r#"<td class="{}">{}</td>"#, class, html_escape(cell))
                            })
                            .collect();
                        format!("<tr>{}</tr>", tds)
                    })
                    .collect::<Vec<_>>()
                    .join("\n            ");

                format!(
                    r##"<section id="details-page-{number}" class="print-section report-page detail-page">
    {logo}
    <h2>{heading}</h2>
    <table class="details">
        <thead>
            <tr>{header_cells}</tr>
        </thead>
        <tbody>
            {rows}
        </tbody>
    </table>
    <div class="caption">
        <strong>Page Summary:</strong> {caption}
    </div>
    {footer}
</section>"##,
                    number = page.number,
                    logo = image_tag(assets.logo.as_deref(), "logo-small", &self.logo_alt()),
                    heading = html_escape(&page.heading()),
                    header_cells = header_cells,
                    rows = rows,
                    caption = html_escape(&page.caption(details.total_units)),
                    footer = footer_block(assets),
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn generate_summary(&self, summary: &SummarySection, assets: &BrandAssets) -> String {
        let steps: String = summary
            .next_steps
            .iter()
            .map(|s| format!("<li>{}</li>", html_escape(s)))
            .collect::<Vec<_>>()
            .join("\n            ");

        format!(
            r##"<section id="summary" class="print-section report-page summary-page">
    {logo}
    <h2>Installation Summary</h2>
    <div class="stat-grid">
        <div class="card">
            <h3 class="stat-label">Total Units Serviced</h3>
            <div class="stat-value" id="total-units">{total_units}</div>
        </div>
        <div class="card">
            <h3 class="stat-label">Project Completion</h3>
            <div class="stat-value">{completion}%</div>
        </div>
    </div>
    <div class="card">
        <h3 class="stat-label">Environmental Impact</h3>
        <p>{impact}</p>
    </div>
    <div class="card">
        <h3 class="stat-label">Next Steps</h3>
        <ul>
            {steps}
        </ul>
    </div>
    {footer}
</section>"##,
            logo = image_tag(assets.logo.as_deref(), "logo-small", &self.logo_alt()),
            total_units = summary.total_units,
            completion = summary.completion_pct,
            impact = html_escape(&summary.environmental_impact),
            steps = steps,
            footer = footer_block(assets),
        )
    }

    fn logo_alt(&self) -> String {
        format!("{} Logo", self.config.branding.company_name)
    }
}

/// Minify in release builds; debug builds keep the markup readable.
fn finish(html: String) -> String {
    if cfg!(debug_assertions) {
        html
    } else {
        let cfg = minify_html::Cfg {
            minify_js: true,
            minify_css: true,
            ..Default::default()
        };
        String::from_utf8(minify_html::minify(html.as_bytes(), &cfg)).unwrap_or(html)
    }
}

fn image_tag(src: Option<&str>, class: &str, alt: &str) -> String {
    match src {
        Some(src) => format!(
            r#"<img class="{}" src="{}" alt="{}">"#,
            class,
            html_escape(src),
            html_escape(alt)
        ),
        None => String::new(),
    }
}

fn footer_block(assets: &BrandAssets) -> String {
    match assets.footer.as_deref() {
        Some(src) => format!(
            r#"<div class="footer-container"><img src="{}" alt="Footer"></div>"#,
            html_escape(src)
        ),
        None => String::new(),
    }
}

/// Escape HTML special characters.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
