//! Server-rendered results panels.
//!
//! Returns HTML fragments the dashboard swaps in after each update.

use askama::Template;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use pulldown_cmark::{html, Event, Options, Parser};

use scout_core::discovery::{DatasetItem, DatasetResult};
use scout_core::matching::{MatchItem, MatchResult};
use scout_core::present::{avatar_index, confidence_class, initials, visible_tags, ScoreBand};
use scout_core::{ViewState, WorkflowKind};

use super::parse_kind;
use crate::state::AppState;

// ============================================================
// TEMPLATES
// ============================================================

#[derive(Template)]
#[template(path = "fragments/matches.html")]
struct MatchesTemplate {
    phase: &'static str,
    error: String,
    intent_summary: String,
    analysis_html: String,
    total: u32,
    cards: Vec<MatchCard>,
}

#[derive(Template)]
#[template(path = "fragments/datasets.html")]
struct DatasetsTemplate {
    phase: &'static str,
    error: String,
    landscape_html: String,
    total: u32,
    has_metadata: bool,
    query_used: String,
    sources_searched: String,
    filters_applied: String,
    cards: Vec<DatasetCard>,
}

struct MatchCard {
    index: usize,
    expanded: bool,
    name: String,
    initials: String,
    avatar: usize,
    title_or_role: String,
    score: u8,
    band: &'static str,
    reasoning: String,
    summary: String,
    tags: Vec<String>,
    more_tags: usize,
    next_steps: Vec<String>,
    confidence: String,
    confidence_class: &'static str,
}

struct DatasetCard {
    index: usize,
    expanded: bool,
    title: String,
    source: String,
    source_type: String,
    year: String,
    authors: String,
    score: u8,
    band: &'static str,
    summary: String,
    methodology: String,
    access_link: String,
    next_steps: Vec<String>,
}

impl MatchCard {
    fn new(index: usize, item: &MatchItem, expanded: Option<usize>) -> Self {
        let (tags, more_tags) = visible_tags(&item.shared_interests);
        Self {
            index,
            expanded: expanded == Some(index),
            name: item.name.clone(),
            initials: initials(&item.name),
            avatar: avatar_index(&item.name),
            title_or_role: item.title_or_role.clone(),
            score: item.compatibility_score,
            band: ScoreBand::of(item.compatibility_score).as_str(),
            reasoning: item.reasoning.clone(),
            summary: item.contextual_summary.clone(),
            tags: tags.to_vec(),
            more_tags,
            next_steps: item.next_steps.clone(),
            confidence: item.confidence_level.clone(),
            confidence_class: confidence_class(&item.confidence_level),
        }
    }
}

impl DatasetCard {
    fn new(index: usize, item: &DatasetItem, expanded: Option<usize>) -> Self {
        Self {
            index,
            expanded: expanded == Some(index),
            title: item.title.clone(),
            source: item.source.clone(),
            source_type: item.source_type.clone(),
            year: item.year.clone(),
            authors: item.authors.join(", "),
            score: item.relevance_score,
            band: ScoreBand::of(item.relevance_score).as_str(),
            summary: item.contextual_summary.clone(),
            methodology: item.methodology_notes.clone(),
            access_link: safe_link(&item.access_link),
            next_steps: item.next_steps.clone(),
        }
    }
}

fn error_text<O>(state: &ViewState<O>) -> String {
    match state {
        ViewState::Error { message } => message.clone(),
        _ => String::new(),
    }
}

/// Render agent-written markdown. Raw HTML is shown as text.
fn markdown(text: &str) -> String {
    let parser = Parser::new_ext(text, Options::ENABLE_STRIKETHROUGH).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

/// Only http(s) links are rendered as anchors.
fn safe_link(link: &str) -> String {
    let link = link.trim();
    if link.starts_with("https://") || link.starts_with("http://") {
        link.to_string()
    } else {
        String::new()
    }
}

fn render_matches(state: &ViewState<MatchResult>, expanded: Option<usize>) -> askama::Result<String> {
    let result = match state {
        ViewState::Success { result } => Some(result),
        _ => None,
    };
    MatchesTemplate {
        phase: state.phase(),
        error: error_text(state),
        intent_summary: result.map(|r| r.intent_summary.clone()).unwrap_or_default(),
        analysis_html: result.map(|r| markdown(&r.overall_analysis)).unwrap_or_default(),
        total: result.map_or(0, |r| r.total_matches),
        cards: result
            .map(|r| r.matches.iter().enumerate().map(|(i, m)| MatchCard::new(i, m, expanded)).collect())
            .unwrap_or_default(),
    }
    .render()
}

fn render_datasets(state: &ViewState<DatasetResult>, expanded: Option<usize>) -> askama::Result<String> {
    let result = match state {
        ViewState::Success { result } => Some(result),
        _ => None,
    };
    let metadata = result.map(|r| r.search_metadata.clone()).unwrap_or_default();
    DatasetsTemplate {
        phase: state.phase(),
        error: error_text(state),
        landscape_html: result.map(|r| markdown(&r.research_landscape_summary)).unwrap_or_default(),
        total: result.map_or(0, |r| r.total_results),
        has_metadata: result.map_or(false, DatasetResult::has_metadata),
        query_used: metadata.query_used,
        sources_searched: metadata.sources_searched.join(", "),
        filters_applied: metadata.filters_applied,
        cards: result
            .map(|r| r.datasets.iter().enumerate().map(|(i, d)| DatasetCard::new(i, d, expanded)).collect())
            .unwrap_or_default(),
    }
    .render()
}

// ============================================================
// HANDLERS
// ============================================================

/// GET /fragments/{workflow} - Render the results panel.
pub async fn results_panel(State(state): State<AppState>, Path(workflow): Path<String>) -> Response {
    let kind = match parse_kind(&workflow) {
        Ok(kind) => kind,
        Err((status, message)) => return (status, Html(message)).into_response(),
    };

    let rendered = {
        let dashboard = state.dashboard.lock().await;
        match kind {
            WorkflowKind::Match => render_matches(dashboard.matching.state(), dashboard.matching.expanded()),
            WorkflowKind::Discover => render_datasets(dashboard.discovery.state(), dashboard.discovery.expanded()),
        }
    };

    match rendered {
        Ok(html) => Html(html).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, Html(format!("Template error: {}", e))).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scout_core::sample;

    #[test]
    fn test_markdown_escapes_raw_html() {
        let out = markdown("**bold** <script>alert(1)</script>");
        assert!(out.contains("<strong>bold</strong>"));
        assert!(!out.contains("<script>"));
    }

    #[test]
    fn test_safe_link() {
        assert_eq!(safe_link(" https://example.org/data "), "https://example.org/data");
        assert_eq!(safe_link("javascript:alert(1)"), "");
    }

    #[test]
    fn test_render_sample_matches() {
        let state = ViewState::Success { result: sample::match_result() };
        let html = render_matches(&state, Some(1)).unwrap();
        assert!(html.contains("Dr. Alex Rivera"));
        assert!(html.contains("Prof. Maria Gonzalez"));
        assert_eq!(html.matches("card expanded").count(), 1);
    }

    #[test]
    fn test_render_error_panel() {
        let state: ViewState<DatasetResult> = ViewState::Error { message: "rate limited".to_string() };
        let html = render_datasets(&state, None).unwrap();
        assert!(html.contains("rate limited"));
        assert!(html.contains("Retry"));
    }

    #[test]
    fn test_render_loading_and_empty() {
        let loading: ViewState<MatchResult> = ViewState::Loading { generation: 1 };
        assert!(render_matches(&loading, None).unwrap().contains("Finding matches"));
        let empty: ViewState<DatasetResult> = ViewState::Empty;
        assert!(render_datasets(&empty, None).unwrap().contains("Search results will appear here"));
    }

    #[test]
    fn test_render_sample_datasets() {
        let state = ViewState::Success { result: sample::dataset_result() };
        let html = render_datasets(&state, None).unwrap();
        assert!(html.contains("CrossModal-3M"));
        assert!(html.contains("search-metadata"));
    }
}
