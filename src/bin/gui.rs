#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use eframe::{egui, App, Frame};
use egui::{Align2, Color32, FontId, Pos2, Rect, RichText, Stroke};
use image::GenericImageView;
use rfd::FileDialog;
use std::convert::Infallible;
use std::f32::consts::{PI, TAU};
use std::{env, fs, path::Path, path::PathBuf};
use plate_cost_calculator::{
    config, logging,
    fields::{FieldSection, InputField},
    form::{FieldValidity, FormState, ValidationError},
    persistence::{FileStore, KeyValueStore, MemoryStore},
    presentation::{
        charts::{ChartKind, ChartPayload, ChartSlot, Rgb, FILL_ALPHA},
        format_amount, ChartRenderer, ChartSlots, PngChartRenderer,
    },
    session::{self, CalculationOutcome, Session},
    workflow::Workflow,
};

fn main() -> Result<(), eframe::Error> {
    // --config path 또는 --config=path
    let mut config_path = PathBuf::from(config::DEFAULT_CONFIG_PATH);
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--config=") {
            config_path = PathBuf::from(val);
        } else if (a == "--config" || a == "-c") && i + 1 < args.len() {
            config_path = PathBuf::from(&args[i + 1]);
            i += 1;
        }
        i += 1;
    }

    let app_cfg = match config::load_or_default(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Config error: {e}");
            config::Config::default()
        }
    };
    logging::init(&app_cfg.log_level);

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(egui::vec2(1180.0, 860.0))
        .with_transparent(true);
    if app_cfg.gui.always_on_top {
        viewport = viewport.with_always_on_top();
    }
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        "Plate Cost Calculator",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_pixels_per_point(app_cfg.gui.ui_scale);
            Box::new(GuiApp::new(app_cfg.clone()))
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["plate_cost.png", "icon.png", "assets/icon.png", "../icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width: w,
        height: h,
    })
}

fn fill_color(c: Rgb) -> Color32 {
    Color32::from_rgba_unmultiplied(c.0, c.1, c.2, (FILL_ALPHA * 255.0).round() as u8)
}

fn border_color(c: Rgb) -> Color32 {
    Color32::from_rgb(c.0, c.1, c.2)
}

/// 화면 위치에 유지되는 차트. 그릴 때 비율과 색을 계산해 두고 매 프레임 칠한다.
#[derive(Debug, Clone)]
struct PaintedChart {
    kind: ChartKind,
    title: String,
    axis_label: Option<String>,
    max: f64,
    items: Vec<PaintedItem>,
}

#[derive(Debug, Clone)]
struct PaintedItem {
    label: String,
    value: f64,
    share: f64,
    fill: Color32,
    border: Color32,
}

impl PaintedChart {
    fn from_payload(chart: &ChartPayload) -> Self {
        let items = chart
            .data
            .iter()
            .zip(chart.shares())
            .map(|(d, share)| PaintedItem {
                label: d.label.clone(),
                value: d.value,
                share,
                fill: fill_color(d.color),
                border: border_color(d.color),
            })
            .collect();
        Self {
            kind: chart.kind,
            title: chart.title.clone(),
            axis_label: chart.axis_label.clone(),
            max: chart.max_value(),
            items,
        }
    }
}

/// egui 화면용 렌더러. 해제는 보관 중인 도형을 버리는 것으로 끝난다.
#[derive(Debug, Default)]
struct EguiChartRenderer {
    released: usize,
}

impl ChartRenderer for EguiChartRenderer {
    type Instance = PaintedChart;
    type Error = Infallible;

    fn draw(&mut self, _slot: ChartSlot, chart: &ChartPayload) -> Result<PaintedChart, Infallible> {
        Ok(PaintedChart::from_payload(chart))
    }

    fn release(&mut self, _slot: ChartSlot, instance: PaintedChart) -> Result<(), Infallible> {
        drop(instance);
        self.released += 1;
        Ok(())
    }
}

/// 부채꼴을 볼록 다각형 조각들로 나눈다. 조각 하나는 최대 45도.
fn wedge_pieces(center: Pos2, radius: f32, start: f32, sweep: f32) -> Vec<Vec<Pos2>> {
    let pieces = (sweep / (PI / 4.0)).ceil().max(1.0) as usize;
    let piece_sweep = sweep / pieces as f32;
    (0..pieces)
        .map(|p| {
            let a0 = start + piece_sweep * p as f32;
            let steps = 12;
            let mut points = Vec::with_capacity(steps + 2);
            points.push(center);
            for k in 0..=steps {
                let a = a0 + piece_sweep * k as f32 / steps as f32;
                points.push(center + radius * egui::vec2(a.cos(), a.sin()));
            }
            points
        })
        .collect()
}

fn paint_chart(ui: &mut egui::Ui, chart: &PaintedChart, size: egui::Vec2) {
    let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
    let rect = response.rect;
    let text_color = ui.visuals().text_color();
    let weak = ui.visuals().weak_text_color();
    painter.text(
        rect.center_top(),
        Align2::CENTER_TOP,
        &chart.title,
        FontId::proportional(14.0),
        text_color,
    );
    let plot = Rect::from_min_max(
        rect.min + egui::vec2(12.0, 26.0),
        rect.max - egui::vec2(12.0, 24.0),
    );

    match chart.kind {
        ChartKind::Bar => {
            if let Some(axis) = &chart.axis_label {
                painter.text(plot.left_top(), Align2::LEFT_TOP, axis, FontId::proportional(11.0), weak);
            }
            let n = chart.items.len().max(1) as f32;
            let slot_w = plot.width() / n;
            let bar_w = slot_w * 0.5;
            let bar_area = plot.height() - 30.0;
            for (i, item) in chart.items.iter().enumerate() {
                let frac = if chart.max > 0.0 { (item.value / chart.max) as f32 } else { 0.0 };
                let x0 = plot.left() + slot_w * i as f32 + (slot_w - bar_w) / 2.0;
                let top = plot.bottom() - bar_area * frac.max(0.0);
                let bar = Rect::from_min_max(egui::pos2(x0, top), egui::pos2(x0 + bar_w, plot.bottom()));
                painter.rect(bar, 0.0, item.fill, Stroke::new(1.0, item.border));
                painter.text(
                    egui::pos2(bar.center().x, top - 2.0),
                    Align2::CENTER_BOTTOM,
                    format_amount(item.value),
                    FontId::proportional(11.0),
                    text_color,
                );
                painter.text(
                    egui::pos2(bar.center().x, plot.bottom() + 4.0),
                    Align2::CENTER_TOP,
                    &item.label,
                    FontId::proportional(11.0),
                    text_color,
                );
            }
            painter.line_segment([plot.left_bottom(), plot.right_bottom()], Stroke::new(1.0, weak));
        }
        ChartKind::Pie => {
            let radius = (plot.height() / 2.0).min(plot.width() * 0.3).max(10.0);
            let center = egui::pos2(plot.left() + radius + 4.0, plot.center().y);
            if chart.items.iter().all(|it| it.share <= 0.0) {
                painter.circle_stroke(center, radius, Stroke::new(1.0, weak));
                painter.text(center, Align2::CENTER_CENTER, "No cost recorded", FontId::proportional(12.0), weak);
            }
            let mut start = -PI / 2.0;
            for item in &chart.items {
                if item.share <= 0.0 {
                    continue;
                }
                let sweep = item.share as f32 * TAU;
                for piece in wedge_pieces(center, radius, start, sweep) {
                    painter.add(egui::Shape::convex_polygon(piece, item.fill, Stroke::NONE));
                }
                let edge = center + radius * egui::vec2(start.cos(), start.sin());
                painter.line_segment([center, edge], Stroke::new(1.0, item.border));
                start += sweep;
            }
            let legend_x = center.x + radius + 16.0;
            for (i, item) in chart.items.iter().enumerate() {
                let y = plot.top() + 4.0 + i as f32 * 18.0;
                let swatch = Rect::from_min_size(egui::pos2(legend_x, y), egui::vec2(12.0, 12.0));
                painter.rect(swatch, 0.0, item.fill, Stroke::new(1.0, item.border));
                painter.text(
                    egui::pos2(legend_x + 18.0, y),
                    Align2::LEFT_TOP,
                    format!("{} {:.1}%", item.label, item.share * 100.0),
                    FontId::proportional(11.0),
                    text_color,
                );
            }
        }
    }
}

struct GuiApp {
    config: config::Config,
    session: Session<Box<dyn KeyValueStore>>,
    form: FormState,
    outcome: Option<CalculationOutcome>,
    slots: ChartSlots<PaintedChart>,
    renderer: EguiChartRenderer,
    /// 제출이 막혔을 때 띄우는 안내창
    validation_alert: Option<ValidationError>,
    /// 한 번 막힌 뒤에는 빈 필드도 표시한다
    show_missing: bool,
    status: Option<String>,
    show_settings_modal: bool,
    applied_on_top: Option<bool>,
    /// 투명도를 곱하기 전의 패널 색. 첫 프레임에 잡는다.
    base_panel_fill: Option<Color32>,
    applied_alpha: Option<f32>,
}

impl GuiApp {
    fn new(config: config::Config) -> Self {
        let store: Box<dyn KeyValueStore> = match FileStore::open(&config.storage_path) {
            Ok(store) => Box::new(store),
            Err(e) => {
                tracing::warn!(error = %e, "storage unavailable, inputs will not persist");
                Box::new(MemoryStore::new())
            }
        };
        let session = Session::new(store);
        let mut form = FormState::new();
        let restored = session.restore_into(&mut form);
        tracing::info!(restored, "application initialized");
        Self {
            config,
            session,
            form,
            outcome: None,
            slots: ChartSlots::new(),
            renderer: EguiChartRenderer::default(),
            validation_alert: None,
            show_missing: false,
            status: (restored > 0).then(|| "Restored previous inputs.".to_string()),
            show_settings_modal: false,
            applied_on_top: None,
            base_panel_fill: None,
            applied_alpha: None,
        }
    }

    /// 설정된 투명도를 원래 패널 색에 한 번만 곱해 적용한다.
    fn apply_window_alpha(&mut self, ctx: &egui::Context) {
        let alpha = self.config.gui.window_alpha;
        if self.applied_alpha == Some(alpha) {
            return;
        }
        let base = *self
            .base_panel_fill
            .get_or_insert_with(|| ctx.style().visuals.panel_fill);
        let mut style = (*ctx.style()).clone();
        style.visuals.panel_fill = base.linear_multiply(alpha);
        ctx.set_style(style);
        self.applied_alpha = Some(alpha);
    }

    fn calculate(&mut self) {
        let outcome = match session::calculate(&self.form) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::info!(invalid = e.invalid.len(), "calculation blocked");
                self.validation_alert = Some(e);
                self.show_missing = true;
                return;
            }
        };
        if let Err(never) = self.slots.render_all(&mut self.renderer, &outcome.charts) {
            match never {}
        }
        self.status = Some(match self.session.save(&outcome.inputs) {
            Ok(()) => "Calculated and saved inputs.".to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "could not save inputs");
                format!("Calculated, but inputs were not saved: {e}")
            }
        });
        self.outcome = Some(outcome);
    }

    fn export_charts(&mut self) {
        let Some(outcome) = &self.outcome else {
            return;
        };
        let Some(dir) = FileDialog::new()
            .set_directory(&self.config.chart_dir)
            .pick_folder()
        else {
            return;
        };
        let mut renderer = PngChartRenderer::new(&dir, self.config.chart_size());
        let mut exported = ChartSlots::new();
        self.status = Some(match exported.render_all(&mut renderer, &outcome.charts) {
            Ok(()) => format!("Charts exported to {}.", dir.display()),
            Err(e) => {
                tracing::warn!(error = %e, "chart export failed");
                format!("Chart export failed: {e}")
            }
        });
    }

    fn ui_inputs(&mut self, ui: &mut egui::Ui) {
        let show_missing = self.show_missing;
        let form = &mut self.form;
        ui.columns(2, |cols| {
            for (col, wf) in cols.iter_mut().zip(Workflow::ALL) {
                col.heading(wf.label());
                for section in FieldSection::ALL {
                    col.label(RichText::new(section.label()).strong());
                    egui::Grid::new(("inputs", wf.key(), section.label()))
                        .num_columns(3)
                        .spacing([8.0, 4.0])
                        .show(col, |ui| {
                            for field in InputField::in_section(section) {
                                input_row(ui, form, wf, field, show_missing);
                            }
                        });
                    col.add_space(6.0);
                }
            }
        });
    }

    fn ui_table(&self, ui: &mut egui::Ui, outcome: &CalculationOutcome) {
        let lower = Color32::from_rgb(20, 140, 70);
        let flagged = Color32::from_rgb(200, 60, 40);
        egui::Grid::new("comparison_table")
            .striped(true)
            .num_columns(4)
            .spacing([24.0, 4.0])
            .show(ui, |ui| {
                ui.label(RichText::new("Item").strong());
                ui.label(RichText::new(Workflow::ChemistryFree.label()).strong());
                ui.label(RichText::new(Workflow::Traditional.label()).strong());
                ui.label(RichText::new("Difference").strong());
                ui.end_row();
                for row in &outcome.rows {
                    let [fl, tr, diff] = row.cells();
                    ui.label(row.label());
                    for (wf, text) in [(Workflow::ChemistryFree, fl), (Workflow::Traditional, tr)] {
                        if row.preferred == Some(wf) {
                            ui.label(RichText::new(text).color(lower).strong());
                        } else {
                            ui.label(text);
                        }
                    }
                    match row.significance_hint() {
                        Some(hint) => {
                            ui.label(RichText::new(format!("{diff} ⚠")).color(flagged))
                                .on_hover_text(hint);
                        }
                        None => {
                            ui.label(diff);
                        }
                    }
                    ui.end_row();
                }
            });
    }

    fn ui_charts(&self, ui: &mut egui::Ui) {
        let width = ((ui.available_width() - 16.0) / 2.0).max(200.0);
        let size = egui::vec2(width, 240.0);
        for pair in ChartSlot::ALL.chunks(2) {
            ui.horizontal(|ui| {
                for slot in pair {
                    if let Some(chart) = self.slots.get(*slot) {
                        paint_chart(ui, chart, size);
                    }
                }
            });
        }
    }
}

fn input_row(ui: &mut egui::Ui, form: &mut FormState, wf: Workflow, field: InputField, show_missing: bool) {
    let validity = form.validity(wf, field);
    let flag = match validity {
        FieldValidity::Valid => false,
        FieldValidity::Missing => show_missing,
        _ => true,
    };
    ui.label(field.label());
    let mut edit = egui::TextEdit::singleline(form.text_mut(wf, field)).desired_width(110.0);
    if flag {
        edit = edit.text_color(Color32::RED);
    }
    let response = ui.add(edit);
    if flag {
        response.on_hover_text(validity.describe());
    }
    ui.label(RichText::new(field.unit()).small());
    ui.end_row();
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        if self.applied_on_top != Some(self.config.gui.always_on_top) {
            ctx.send_viewport_cmd(egui::ViewportCommand::WindowLevel(if self.config.gui.always_on_top {
                egui::WindowLevel::AlwaysOnTop
            } else {
                egui::WindowLevel::Normal
            }));
            self.applied_on_top = Some(self.config.gui.always_on_top);
        }

        self.apply_window_alpha(ctx);

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Plate Cost Calculator");
                ui.separator();
                let enabled = self.validation_alert.is_none();
                if ui.add_enabled(enabled, egui::Button::new("Calculate")).clicked() {
                    self.calculate();
                }
                if ui
                    .add_enabled(enabled && self.outcome.is_some(), egui::Button::new("Export charts"))
                    .clicked()
                {
                    self.export_charts();
                }
                if ui.button("Settings").clicked() {
                    self.show_settings_modal = true;
                }
                if let Some(msg) = &self.status {
                    ui.separator();
                    ui.label(msg);
                }
            });
        });

        if let Some(err) = &self.validation_alert {
            let mut close = false;
            egui::Window::new("Invalid input")
                .collapsible(false)
                .resizable(false)
                .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
                .show(ctx, |ui| {
                    ui.label("Please fill in all required fields with valid values.");
                    ui.label(format!("{} field(s) need attention.", err.invalid.len()));
                    if ui.button("OK").clicked() {
                        close = true;
                    }
                });
            if close {
                self.validation_alert = None;
            }
        }

        if self.show_settings_modal {
            let mut open = true;
            egui::Window::new("Settings")
                .collapsible(false)
                .resizable(true)
                .open(&mut open)
                .show(ctx, |ui| {
                    ui.label("UI scale");
                    if ui
                        .add(egui::Slider::new(&mut self.config.gui.ui_scale, 0.8..=1.6).suffix(" x"))
                        .changed()
                    {
                        ctx.set_pixels_per_point(self.config.gui.ui_scale);
                    }
                    ui.checkbox(&mut self.config.gui.always_on_top, "Always on top");
                    ui.label("Window transparency");
                    ui.add(egui::Slider::new(&mut self.config.gui.window_alpha, 0.3..=1.0).text("alpha"));
                    if ui.button("Save settings").clicked() {
                        self.status = Some(match self.config.save() {
                            Ok(()) => "Settings saved.".to_string(),
                            Err(e) => format!("Save error: {e}"),
                        });
                    }
                });
            self.show_settings_modal = open;
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(self.validation_alert.is_none(), |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false; 2])
                    .show(ui, |ui| {
                        self.ui_inputs(ui);
                        if let Some(outcome) = &self.outcome {
                            ui.separator();
                            ui.heading("Cost comparison (CNY/month)");
                            self.ui_table(ui, outcome);
                            ui.separator();
                            self.ui_charts(ui);
                        }
                    });
            });
        });
    }
}
