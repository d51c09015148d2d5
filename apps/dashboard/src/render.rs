//! Plain-text rendering of the dashboard grids.

use std::fmt::Write;

use investor_dashboard_core::constants::DEFAULT_PAGE_SIZE;
use investor_dashboard_core::dashboard::{DashboardState, LoadState};
use investor_dashboard_core::utils::format_currency;
use investor_dashboard_core::{AssetClassFilter, Commitment, FilterOption, InvestorSummary};
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Cell, Row, Table, Widget};

const NO_RECORDS: &str = "No records to display";

const COLUMN_SPACING: u16 = 2;

struct Column {
    header: &'static str,
    alignment: Alignment,
}

const INVESTOR_COLUMNS: [Column; 6] = [
    Column { header: "Id", alignment: Alignment::Right },
    Column { header: "Name", alignment: Alignment::Left },
    Column { header: "Type", alignment: Alignment::Left },
    Column { header: "Country", alignment: Alignment::Left },
    Column { header: "Date Added", alignment: Alignment::Left },
    Column { header: "Total Commitment", alignment: Alignment::Right },
];

const COMMITMENT_COLUMNS: [Column; 4] = [
    Column { header: "Id", alignment: Alignment::Right },
    Column { header: "Asset Class", alignment: Alignment::Left },
    Column { header: "Currency", alignment: Alignment::Left },
    Column { header: "Amount", alignment: Alignment::Right },
];

/// One page of a grid, already clamped to the available rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: usize,
    pub total_pages: usize,
    pub start: usize,
    pub end: usize,
}

impl PageWindow {
    /// Clamps `page` (1-based) into range for `len` rows.
    pub fn new(len: usize, page: usize, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let total_pages = len.div_ceil(page_size).max(1);
        let page = page.clamp(1, total_pages);
        let start = (page - 1) * page_size;
        let end = (start + page_size).min(len);
        Self {
            page,
            total_pages,
            start,
            end,
        }
    }
}

/// Renders the whole dashboard for the current state.
pub fn render_dashboard(state: &DashboardState, page: usize) -> String {
    let mut out = render_investors(state.investors());
    if state.selected_investor().is_some() {
        out.push('\n');
        out.push_str(&render_commitments(state, page));
    }
    out
}

pub fn render_investors(investors: &LoadState<Vec<InvestorSummary>>) -> String {
    let mut out = String::from("Investors\n");
    match investors {
        LoadState::Idle => {}
        LoadState::Loading => out.push_str("Loading investors...\n"),
        LoadState::Failed(e) => {
            let _ = writeln!(out, "error: could not load investors: {}", e);
        }
        LoadState::Loaded(rows) if rows.is_empty() => {
            let _ = writeln!(out, "{}", NO_RECORDS);
        }
        LoadState::Loaded(rows) => {
            let cells: Vec<Vec<String>> = rows.iter().map(investor_row).collect();
            out.push_str(&render_table(&INVESTOR_COLUMNS, &cells));
        }
    }
    out
}

pub fn render_commitments(state: &DashboardState, page: usize) -> String {
    let mut out = String::new();
    let detail = match state.detail() {
        LoadState::Idle => return out,
        LoadState::Loading => {
            let investor_id = state.selected_investor().unwrap_or_default();
            let _ = writeln!(out, "Commitments\nLoading investor {}...", investor_id);
            return out;
        }
        LoadState::Failed(e) => {
            let _ = writeln!(out, "Commitments\nerror: could not load investor: {}", e);
            return out;
        }
        LoadState::Loaded(detail) => detail,
    };

    let _ = writeln!(out, "Commitments: {}", detail.name);
    let _ = writeln!(
        out,
        "{}",
        render_filter_bar(&state.filter_options(), state.active_filter())
    );

    let visible = state.visible_commitments();
    if visible.is_empty() {
        let _ = writeln!(out, "{}", NO_RECORDS);
        return out;
    }

    let window = PageWindow::new(visible.len(), page, DEFAULT_PAGE_SIZE);
    let cells: Vec<Vec<String>> = visible[window.start..window.end]
        .iter()
        .map(commitment_row)
        .collect();
    out.push_str(&render_table(&COMMITMENT_COLUMNS, &cells));
    let _ = writeln!(
        out,
        "Page {} of {} ({} commitments)",
        window.page,
        window.total_pages,
        visible.len()
    );
    out
}

/// Renders `[All £1.2B] <Equity £400M> [Debt £800M]`, the active filter in angle brackets.
pub fn render_filter_bar(options: &[FilterOption], active: &AssetClassFilter) -> String {
    options
        .iter()
        .map(|option| {
            let label = format!("{} {}", option.filter.name(), format_currency(option.total));
            if &option.filter == active {
                format!("<{}>", label)
            } else {
                format!("[{}]", label)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn investor_row(investor: &InvestorSummary) -> Vec<String> {
    vec![
        investor.id.to_string(),
        investor.name.clone(),
        investor.investor_type.clone(),
        investor.country.clone(),
        investor.date_added.to_string(),
        format_currency(investor.total_commitment),
    ]
}

fn commitment_row(commitment: &Commitment) -> Vec<String> {
    vec![
        commitment.id.to_string(),
        commitment.asset_class.clone(),
        commitment.currency.clone(),
        format_currency(commitment.amount),
    ]
}

/// Lays `rows` out with a ratatui [`Table`] and returns the rendered lines.
///
/// Columns are sized to their widest cell, measured in terminal columns.
fn render_table(columns: &[Column], rows: &[Vec<String>]) -> String {
    let widths: Vec<u16> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| Line::from(cell.as_str()).width())
                .chain(std::iter::once(Line::from(column.header).width()))
                .max()
                .unwrap_or(0)
        })
        .map(|width| u16::try_from(width).unwrap_or(u16::MAX))
        .collect();

    let gaps = u16::try_from(columns.len().saturating_sub(1)).unwrap_or(u16::MAX);
    let spacing = COLUMN_SPACING.saturating_mul(gaps);
    let width = widths
        .iter()
        .fold(spacing, |total, width| total.saturating_add(*width));
    let height = u16::try_from(rows.len() + 1).unwrap_or(u16::MAX);

    let header = Row::new(
        columns
            .iter()
            .map(|column| aligned_cell(column.header.to_string(), column.alignment)),
    );
    let body = rows.iter().map(|row| {
        Row::new(columns.iter().enumerate().map(|(i, column)| {
            aligned_cell(row.get(i).cloned().unwrap_or_default(), column.alignment)
        }))
    });
    let table = Table::new(body, widths.iter().map(|&width| Constraint::Length(width)))
        .header(header)
        .column_spacing(COLUMN_SPACING);

    // Struct literal: Rect::new clamps the area to u16::MAX cells
    let area = Rect {
        x: 0,
        y: 0,
        width,
        height,
    };
    let mut buffer = Buffer::empty(area);
    Widget::render(table, area, &mut buffer);
    buffer_lines(&buffer)
}

fn aligned_cell(text: String, alignment: Alignment) -> Cell<'static> {
    Cell::from(Line::from(text).alignment(alignment))
}

fn buffer_lines(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut out = String::new();
    for y in area.top()..area.bottom() {
        let line: String = (area.left()..area.right())
            .filter_map(|x| buffer.cell((x, y)))
            .map(|cell| cell.symbol())
            .collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use investor_dashboard_core::dashboard::{DashboardCommand, DashboardEvent};
    use investor_dashboard_core::errors::{Error, TransportError};
    use investor_dashboard_core::{AssetClassFilter, InvestorDetail};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn commitment(id: i64, asset_class: &str, amount: Decimal) -> Commitment {
        Commitment {
            id,
            asset_class: asset_class.to_string(),
            amount,
            currency: "GBP".to_string(),
        }
    }

    fn detail(commitments: Vec<Commitment>) -> InvestorDetail {
        InvestorDetail {
            id: 3,
            name: "Mjd Jedi fund".to_string(),
            investor_type: "bank".to_string(),
            country: "United Kingdom".to_string(),
            date_added: NaiveDate::from_ymd_opt(2010, 6, 8).unwrap(),
            total_commitment: dec!(2400000000),
            commitments,
        }
    }

    fn loaded_state(commitments: Vec<Commitment>) -> DashboardState {
        let mut state = DashboardState::new();
        let request = match state.handle(DashboardEvent::InvestorSelected(3)) {
            Some(DashboardCommand::FetchInvestorDetail(request)) => request,
            other => panic!("expected a detail fetch, got {:?}", other),
        };
        state.handle(DashboardEvent::DetailLoaded {
            request,
            result: Ok(detail(commitments)),
        });
        state
    }

    #[test]
    fn page_window_clamps() {
        assert_eq!(
            PageWindow::new(25, 1, 10),
            PageWindow { page: 1, total_pages: 3, start: 0, end: 10 }
        );
        assert_eq!(
            PageWindow::new(25, 9, 10),
            PageWindow { page: 3, total_pages: 3, start: 20, end: 25 }
        );
        assert_eq!(
            PageWindow::new(0, 2, 10),
            PageWindow { page: 1, total_pages: 1, start: 0, end: 0 }
        );
    }

    #[test]
    fn investors_grid_formats_totals() {
        let investors = LoadState::Loaded(vec![detail(vec![]).summary()]);
        let out = render_investors(&investors);

        assert!(out.contains("Total Commitment"));
        assert!(out.contains("Mjd Jedi fund"));
        assert!(out.contains("2010-06-08"));
        assert!(out.contains("£2.4B"));
    }

    #[test]
    fn failure_is_distinct_from_empty() {
        let failed: LoadState<Vec<InvestorSummary>> =
            LoadState::Failed(Error::from(TransportError::Connection("refused".into())));
        let empty: LoadState<Vec<InvestorSummary>> = LoadState::Loaded(vec![]);

        assert!(render_investors(&failed).contains("error: could not load investors"));
        assert!(render_investors(&empty).contains(NO_RECORDS));
        assert!(!render_investors(&empty).contains("error"));
        assert!(render_investors(&LoadState::Loading).contains("Loading investors"));
    }

    #[test]
    fn filter_bar_marks_active_entry() {
        let state = loaded_state(vec![
            commitment(1, "Equity", dec!(100000000)),
            commitment(2, "Debt", dec!(300000000)),
        ]);

        let bar = render_filter_bar(
            &state.filter_options(),
            &AssetClassFilter::AssetClass("Debt".into()),
        );
        assert_eq!(bar, "[All £2.4B] <Debt £300M> [Equity £100M]");
    }

    #[test]
    fn filter_bar_tells_all_apart_from_class_named_all() {
        let state = loaded_state(vec![
            commitment(1, "All", dec!(5000)),
            commitment(2, "Debt", dec!(1000)),
        ]);

        let bar = render_filter_bar(&state.filter_options(), &AssetClassFilter::All);
        assert_eq!(bar, "<All £2.4B> [All £5K] [Debt £1K]");

        let bar = render_filter_bar(
            &state.filter_options(),
            &AssetClassFilter::AssetClass("All".into()),
        );
        assert_eq!(bar, "[All £2.4B] <All £5K> [Debt £1K]");
    }

    #[test]
    fn commitments_grid_follows_filter() {
        let mut state = loaded_state(vec![
            commitment(1, "Equity", dec!(100000000)),
            commitment(2, "Debt", dec!(300000000)),
        ]);
        state.handle(DashboardEvent::FilterSelected(AssetClassFilter::from_name(
            "Equity",
        )));

        let out = render_commitments(&state, 1);
        assert!(out.contains("Commitments: Mjd Jedi fund"));
        assert!(out.contains("<Equity £100M>"));
        assert!(out.contains("£100M"));
        assert!(!out.lines().any(|l| l.contains("Debt") && l.contains("GBP")));
        assert!(out.contains("Page 1 of 1 (1 commitments)"));
    }

    #[test]
    fn commitments_grid_is_paginated() {
        let commitments = (1..=12)
            .map(|id| commitment(id, "Equity", dec!(1000)))
            .collect();
        let state = loaded_state(commitments);

        let out = render_commitments(&state, 2);
        assert!(out.contains("Page 2 of 2 (12 commitments)"));
        let rows = out.lines().filter(|l| l.contains("GBP")).count();
        assert_eq!(rows, 2);
    }

    #[test]
    fn table_aligns_multibyte_cells() {
        let rows = vec![
            vec!["1".to_string(), "£2K".to_string()],
            vec!["12".to_string(), "£1.5B".to_string()],
        ];
        let columns = [
            Column { header: "Id", alignment: Alignment::Right },
            Column { header: "Amount", alignment: Alignment::Right },
        ];
        let out = render_table(&columns, &rows);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines, vec!["Id  Amount", " 1     £2K", "12   £1.5B"]);
    }

    #[test]
    fn table_columns_fit_widest_cell() {
        let rows = vec![vec!["7".to_string(), "Hedge Funds".to_string()]];
        let columns = [
            Column { header: "Id", alignment: Alignment::Right },
            Column { header: "Asset Class", alignment: Alignment::Left },
        ];
        let out = render_table(&columns, &rows);

        assert_eq!(out, "Id  Asset Class\n 7  Hedge Funds\n");
    }
}
