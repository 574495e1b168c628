// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.

use crate::browser;
use eframe::egui;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tabula::error::{ExportError, LoadError, LoadResult};
use tabula::source::{load_dropped, load_path, LoadedTable};
use tabula::{
    chart_js, ChartConfig, ChartRequest, ChartType, ColumnProfile, ExportFormat, LoadOutcome,
    LoadTicket, ProfileCard, Session, SortOrder, TabulaError, TableSource, UrlFetcher,
    ViewerConfig,
};
use tokio::runtime::Runtime;
use tracing::{error, info};

const COPY_FEEDBACK: Duration = Duration::from_secs(2);

pub fn run(runtime: Arc<Runtime>, config: ViewerConfig, initial: Option<String>) -> anyhow::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_title(config.window.title.clone())
            .with_drag_and_drop(true),
        ..Default::default()
    };
    let title = config.window.title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            let mut app = ViewerApp::new(runtime, config);
            if let Some(argument) = initial {
                app.open_source(&cc.egui_ctx, TableSource::from_argument(&argument));
            }
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Viewer window failed: {e}"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActiveTab {
    Grid,
    Statistics,
    Chart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Local,
    Url,
}

struct LoadMessage {
    ticket: LoadTicket,
    result: LoadResult<LoadedTable>,
}

#[derive(Default)]
struct UrlDialog {
    open: bool,
    input: String,
    error: Option<String>,
}

struct ViewerApp {
    session: Session,
    config: ViewerConfig,
    runtime: Arc<Runtime>,
    fetcher: Option<UrlFetcher>,
    load_tx: Sender<LoadMessage>,
    load_rx: Receiver<LoadMessage>,
    pending: Option<(LoadTicket, Origin)>,
    url_dialog: UrlDialog,
    search_input: String,
    rename_input: Option<String>,
    active_tab: ActiveTab,
    statistics: Vec<ColumnProfile>,
    chart_request: ChartRequest,
    chart: Option<ChartConfig>,
    chart_page: Option<PathBuf>,
    copied_at: Option<Instant>,
}

impl ViewerApp {
    fn new(runtime: Arc<Runtime>, config: ViewerConfig) -> Self {
        let (load_tx, load_rx) = channel();
        let mut session = Session::with_config(&config);
        let fetcher = match UrlFetcher::new(&config.fetch) {
            Ok(fetcher) => Some(fetcher),
            Err(e) => {
                session.report(&TabulaError::Load(e));
                None
            }
        };
        let chart_request = config.chart.request();
        Self {
            session,
            config,
            runtime,
            fetcher,
            load_tx,
            load_rx,
            pending: None,
            url_dialog: UrlDialog::default(),
            search_input: String::new(),
            rename_input: None,
            active_tab: ActiveTab::Grid,
            statistics: Vec::new(),
            chart_request,
            chart: None,
            chart_page: None,
            copied_at: None,
        }
    }

    fn open_source(&mut self, ctx: &egui::Context, source: TableSource) {
        match source {
            TableSource::File(path) => {
                let ticket = self.session.begin_load();
                self.finish(ticket, Origin::Local, load_path(&path));
            }
            TableSource::Dropped { name, bytes } => {
                let ticket = self.session.begin_load();
                self.finish(ticket, Origin::Local, load_dropped(&name, &bytes));
            }
            TableSource::Url(url) => self.start_url_load(ctx, url),
        }
    }

    fn start_url_load(&mut self, ctx: &egui::Context, input: String) {
        if input.trim().is_empty() {
            self.url_dialog.error = Some(TabulaError::Load(LoadError::EmptyUrl).user_message());
            return;
        }
        let Some(fetcher) = self.fetcher.clone() else {
            self.url_dialog.error = Some("URL loading is unavailable".to_string());
            return;
        };
        let ticket = self.session.begin_load();
        self.pending = Some((ticket, Origin::Url));
        self.url_dialog.error = None;
        let tx = self.load_tx.clone();
        let ctx = ctx.clone();
        self.runtime.spawn(async move {
            let result = fetcher.fetch(&input).await;
            if tx.send(LoadMessage { ticket, result }).is_err() {
                error!("Viewer closed before the URL load finished");
            }
            ctx.request_repaint();
        });
    }

    fn poll_loads(&mut self) {
        while let Ok(message) = self.load_rx.try_recv() {
            self.finish(message.ticket, Origin::Url, message.result);
        }
    }

    fn finish(&mut self, ticket: LoadTicket, origin: Origin, result: LoadResult<LoadedTable>) {
        match self.session.finish_load(ticket, result) {
            LoadOutcome::Applied => {
                self.pending = None;
                self.search_input.clear();
                self.rename_input = None;
                self.statistics.clear();
                self.clear_chart();
                self.active_tab = ActiveTab::Grid;
                if origin == Origin::Url {
                    self.url_dialog = UrlDialog::default();
                }
            }
            LoadOutcome::Failed => {
                self.pending = None;
                if origin == Origin::Url && self.url_dialog.open {
                    self.url_dialog.error = self.session.error().map(str::to_string);
                    self.session.clear_error();
                }
            }
            LoadOutcome::Stale => {}
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let Some(file) = dropped.into_iter().next() else {
            return;
        };
        if let Some(path) = file.path {
            self.open_source(ctx, TableSource::File(path));
        } else if let Some(bytes) = file.bytes {
            self.open_source(
                ctx,
                TableSource::Dropped {
                    name: file.name,
                    bytes: bytes.to_vec(),
                },
            );
        }
    }

    fn report(&mut self, error: TabulaError) {
        self.session.report(&error);
    }

    fn save_export(&mut self, format: ExportFormat) {
        let document = match self.session.export(format) {
            Ok(document) => document,
            Err(e) => return self.report(e),
        };
        let Some(path) = rfd::FileDialog::new()
            .add_filter(format.extension(), &[format.extension()])
            .set_file_name(&document.file_name)
            .save_file()
        else {
            return;
        };
        match std::fs::write(&path, &document.content) {
            Ok(()) => info!(path = %path.display(), "Saved export"),
            Err(source) => self.report(
                ExportError::Write {
                    path: path.display().to_string(),
                    source,
                }
                .into(),
            ),
        }
    }

    fn copy_to_clipboard(&mut self, ctx: &egui::Context) {
        match self.session.clipboard_text() {
            Ok(text) => {
                ctx.copy_text(text);
                self.copied_at = Some(Instant::now());
            }
            Err(e) => self.report(TabulaError::Export(ExportError::Clipboard(e.to_string()))),
        }
    }

    fn print(&mut self) {
        let result = self
            .session
            .print_document()
            .and_then(|html| browser::show_page("tabula-print", &html).map_err(Into::into));
        if let Err(e) = result {
            self.report(e);
        }
    }

    fn show_statistics(&mut self) {
        if let Some(profiles) = self.session.statistics() {
            self.statistics = profiles;
            self.active_tab = ActiveTab::Statistics;
        }
    }

    fn generate_chart(&mut self) {
        let chart = match self.session.build_chart(&self.chart_request) {
            Ok(chart) => chart,
            Err(e) => return self.report(e),
        };
        let page = chart_js::to_html(&chart)
            .map_err(TabulaError::from)
            .and_then(|html| browser::show_page("tabula-chart", &html).map_err(Into::into));
        match page {
            Ok(path) => self.chart_page = Some(path),
            Err(e) => self.report(e),
        }
        self.chart = Some(chart);
    }

    fn clear_chart(&mut self) {
        self.chart = None;
        self.chart_page = None;
        self.chart_request = self.config.chart.request();
    }

    fn rerun_search(&mut self) {
        if self.search_input.trim().is_empty() {
            self.session.clear_search();
        } else {
            self.session.search(&self.search_input);
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_loads();
        self.handle_dropped_files(ctx);

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(&self.config.window.title);
                ui.separator();
                if ui.button("Open CSV").clicked() {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("CSV files", &["csv"])
                        .pick_file()
                    {
                        self.open_source(ctx, TableSource::File(path));
                    }
                }
                if ui.button("Load from URL").clicked() {
                    self.url_dialog.open = true;
                }
                if self.pending.is_some() {
                    ui.spinner();
                    ui.label("Loading...");
                }
            });
            if self.session.has_data() {
                self.render_file_info(ui);
                self.render_toolbar(ui, ctx);
            }
        });

        egui::TopBottomPanel::bottom("bottom_panel").show(ctx, |ui| {
            ui.horizontal(|ui| match self.session.dataset() {
                Some(dataset) => {
                    ui.label(dataset.table().dimensions_label());
                    if !dataset.warnings().is_empty() {
                        ui.colored_label(
                            egui::Color32::YELLOW,
                            format!("{} parse warnings", dataset.warnings().len()),
                        );
                    }
                    let results = self.session.search_results();
                    if results.is_active() {
                        ui.label(format!("{} matches", results.len()));
                    }
                }
                None => {
                    ui.label("No file loaded");
                }
            });
        });

        self.render_url_dialog(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(message) = self.session.error().map(str::to_string) {
                ui.horizontal(|ui| {
                    ui.colored_label(egui::Color32::RED, message);
                    if ui.small_button("Dismiss").clicked() {
                        self.session.clear_error();
                    }
                });
                ui.separator();
            }

            if !self.session.has_data() {
                let hovering = ctx.input(|i| !i.raw.hovered_files.is_empty());
                ui.centered_and_justified(|ui| {
                    if hovering {
                        ui.heading("Drop the CSV file to open it");
                    } else {
                        ui.heading("Drop a CSV file here, or use Open CSV");
                    }
                });
                return;
            }

            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.active_tab, ActiveTab::Grid, "Data");
                if ui
                    .selectable_label(self.active_tab == ActiveTab::Statistics, "Statistics")
                    .clicked()
                {
                    self.show_statistics();
                }
                ui.selectable_value(&mut self.active_tab, ActiveTab::Chart, "Chart");
            });
            ui.separator();

            match self.active_tab {
                ActiveTab::Grid => self.render_grid(ui),
                ActiveTab::Statistics => self.render_statistics(ui),
                ActiveTab::Chart => self.render_chart_panel(ui),
            }
        });

        if let Some(at) = self.copied_at {
            if at.elapsed() >= COPY_FEEDBACK {
                self.copied_at = None;
            } else {
                ctx.request_repaint_after(COPY_FEEDBACK - at.elapsed());
            }
        }
    }
}

impl ViewerApp {
    fn render_file_info(&mut self, ui: &mut egui::Ui) {
        let Some(info) = self.session.file_info() else {
            return;
        };
        ui.horizontal(|ui| {
            match self.rename_input.as_mut() {
                Some(input) => {
                    let response = ui.text_edit_singleline(input);
                    let (enter, escape) =
                        ui.input(|i| (i.key_pressed(egui::Key::Enter), i.key_pressed(egui::Key::Escape)));
                    if escape {
                        self.rename_input = None;
                    } else if response.lost_focus() || enter {
                        let input = input.clone();
                        self.session.rename(&input);
                        self.rename_input = None;
                    } else if !response.has_focus() {
                        response.request_focus();
                    }
                }
                None => {
                    ui.strong(&info.display_name);
                    if ui.small_button("Rename").clicked() {
                        self.rename_input = Some(info.display_name.clone());
                    }
                }
            }
            ui.label(&info.summary);
        });
    }

    fn render_toolbar(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.horizontal(|ui| {
            ui.label("Search:");
            if ui.text_edit_singleline(&mut self.search_input).changed() {
                self.rerun_search();
            }
            if !self.search_input.is_empty() && ui.small_button("x").clicked() {
                self.search_input.clear();
                self.session.clear_search();
            }
            ui.separator();
            if ui.button("Export CSV").clicked() {
                self.save_export(ExportFormat::Csv);
            }
            if ui.button("Export JSON").clicked() {
                self.save_export(ExportFormat::Json);
            }
            let copy_label = if self.copied_at.is_some() { "Copied!" } else { "Copy" };
            if ui.button(copy_label).clicked() {
                self.copy_to_clipboard(ctx);
            }
            if ui.button("Print").clicked() {
                self.print();
            }
            if ui.button("Statistics").clicked() {
                self.show_statistics();
            }
            if ui.button("Chart").clicked() {
                self.active_tab = ActiveTab::Chart;
            }
        });
    }

    fn render_url_dialog(&mut self, ctx: &egui::Context) {
        if !self.url_dialog.open {
            return;
        }
        let mut open = true;
        let mut submit = false;
        egui::Window::new("Load CSV from URL")
            .collapsible(false)
            .resizable(false)
            .open(&mut open)
            .show(ctx, |ui| {
                let response = ui.text_edit_singleline(&mut self.url_dialog.input);
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    submit = true;
                }
                if let Some(message) = &self.url_dialog.error {
                    ui.colored_label(egui::Color32::RED, message);
                }
                ui.horizontal(|ui| {
                    if ui.button("Load").clicked() {
                        submit = true;
                    }
                    if self.pending.is_some() {
                        ui.spinner();
                    }
                });
            });
        if submit {
            let input = self.url_dialog.input.clone();
            self.start_url_load(ctx, input);
        }
        if !open {
            self.url_dialog = UrlDialog::default();
        }
    }

    fn render_grid(&mut self, ui: &mut egui::Ui) {
        let row_height = self.config.window.row_height;
        let results = self.session.search_results().clone();
        let Some(grid) = self.session.grid_mut() else {
            return;
        };
        let headers = grid.headers().to_vec();
        let sort = grid.sort_state();
        let row_count = grid.row_count();
        let mut sort_clicked = None;
        let mut edited = false;
        egui::ScrollArea::both()
            .auto_shrink([false, false])
            .show_rows(ui, row_height, row_count, |ui, rows| {
                egui::Grid::new("data_grid")
                    .striped(true)
                    .min_col_width(80.0)
                    .show(ui, |ui| {
                        ui.label("#");
                        for (index, header) in headers.iter().enumerate() {
                            let marker = match sort {
                                Some(s) if s.column == index && s.order == SortOrder::Ascending => " ^",
                                Some(s) if s.column == index => " v",
                                _ => "",
                            };
                            if ui.button(format!("{header}{marker}")).clicked() {
                                sort_clicked = Some(index);
                            }
                        }
                        ui.end_row();
                        for row in rows {
                            ui.label((row + 1).to_string());
                            for column in 0..headers.len() {
                                let Some(cell) = grid.cell_mut(row, column) else {
                                    continue;
                                };
                                let mut editor =
                                    egui::TextEdit::singleline(cell).desired_width(120.0);
                                if results.contains(row, column) {
                                    editor = editor.text_color(egui::Color32::from_rgb(230, 126, 34));
                                }
                                if ui.add(editor).changed() {
                                    edited = true;
                                }
                            }
                            ui.end_row();
                        }
                    });
            });
        if let Some(column) = sort_clicked {
            grid.toggle_sort(column);
        }
        if edited || sort_clicked.is_some() {
            self.rerun_search();
        }
    }

    fn render_statistics(&mut self, ui: &mut egui::Ui) {
        if self.statistics.is_empty() {
            ui.label("No statistics available.");
            return;
        }
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                for (i, profile) in self.statistics.iter().enumerate() {
                    let card = ProfileCard::from(profile);
                    ui.push_id(i, |ui| {
                        ui.group(|ui| {
                            ui.set_min_width(180.0);
                            ui.vertical(|ui| {
                                ui.strong(&card.title);
                                for (label, value) in &card.items {
                                    ui.horizontal(|ui| {
                                        ui.label(format!("{label}:"));
                                        ui.monospace(value);
                                    });
                                }
                            });
                        });
                    });
                }
            });
        });
    }

    fn render_chart_panel(&mut self, ui: &mut egui::Ui) {
        let columns: Vec<String> = self
            .session
            .table()
            .map(|t| t.columns().to_vec())
            .unwrap_or_default();
        ui.horizontal(|ui| {
            egui::ComboBox::from_label("Chart type")
                .selected_text(self.chart_request.chart_type.as_str())
                .show_ui(ui, |ui| {
                    for chart_type in ChartType::ALL {
                        ui.selectable_value(
                            &mut self.chart_request.chart_type,
                            chart_type,
                            chart_type.as_str(),
                        );
                    }
                });
            column_picker(ui, "X-axis", &mut self.chart_request.x_column, &columns);
            column_picker(ui, "Y-axis", &mut self.chart_request.y_column, &columns);
        });
        let numeric = self.session.numeric_columns();
        if !numeric.is_empty() {
            ui.label(format!("Numeric columns: {}", numeric.join(", ")));
        }

        if self.chart_request.chart_type.supports_extra_series() {
            ui.group(|ui| {
                ui.label("Additional series");
                let mut remove = None;
                for index in 0..self.chart_request.extra_series.len() {
                    let mut chosen = self.chart_request.extra_series.clone();
                    chosen.remove(index);
                    let candidates = self
                        .session
                        .series_candidates(&self.chart_request.y_column, &chosen);
                    ui.horizontal(|ui| {
                        ui.push_id(index, |ui| {
                            column_picker(
                                ui,
                                "",
                                &mut self.chart_request.extra_series[index],
                                &candidates,
                            );
                        });
                        if ui.small_button("x").clicked() {
                            remove = Some(index);
                        }
                    });
                }
                if let Some(index) = remove {
                    self.chart_request.extra_series.remove(index);
                }
                if ui.button("Add series").clicked() {
                    self.chart_request.extra_series.push(String::new());
                }
            });
        } else {
            self.chart_request.extra_series.clear();
        }

        ui.horizontal(|ui| {
            if ui.button("Generate chart").clicked() {
                self.generate_chart();
            }
            if ui.button("Clear").clicked() {
                self.clear_chart();
            }
            if let Some(path) = &self.chart_page {
                ui.label(format!("Chart page: {}", path.display()));
            }
        });
        ui.separator();

        if let Some(chart) = &self.chart {
            render_chart_preview(ui, chart);
        }
    }
}

fn column_picker(ui: &mut egui::Ui, label: &str, value: &mut String, columns: &[String]) {
    let selected = if value.is_empty() {
        "Select column...".to_string()
    } else {
        value.clone()
    };
    egui::ComboBox::from_label(label)
        .selected_text(selected)
        .show_ui(ui, |ui| {
            ui.selectable_value(value, String::new(), "Select column...");
            for column in columns {
                ui.selectable_value(value, column.clone(), column.as_str());
            }
        });
}

fn render_chart_preview(ui: &mut egui::Ui, chart: &ChartConfig) {
    ui.strong(&chart.title);
    egui::ScrollArea::both().show(ui, |ui| {
        egui::Grid::new("chart_preview").striped(true).show(ui, |ui| {
            match chart.chart_type {
                ChartType::Scatter => {
                    ui.strong("x");
                    ui.strong("y");
                    ui.end_row();
                    for dataset in &chart.datasets {
                        for point in dataset.data.points().unwrap_or_default() {
                            ui.monospace(format!("{:.2}", point.x));
                            ui.monospace(format!("{:.2}", point.y));
                            ui.end_row();
                        }
                    }
                }
                _ => {
                    ui.strong("Category");
                    for dataset in &chart.datasets {
                        ui.strong(&dataset.label);
                    }
                    ui.end_row();
                    for (index, label) in chart.labels.iter().enumerate() {
                        ui.label(label);
                        for dataset in &chart.datasets {
                            let value = dataset
                                .data
                                .values()
                                .and_then(|v| v.get(index))
                                .copied()
                                .unwrap_or_default();
                            ui.monospace(format!("{value:.2}"));
                        }
                        ui.end_row();
                    }
                }
            }
        });
    });
}
