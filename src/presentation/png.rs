//! plotters로 차트를 PNG 파일에 그린다. CLI 출력과 GUI 내보내기에 쓴다.

use plotters::prelude::*;
use std::f64::consts::PI;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::charts::{ChartKind, ChartPayload, ChartSlot, Rgb, FILL_ALPHA};
use super::slots::ChartRenderer;

/// 차트 파일 생성 중 발생 가능한 오류.
#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("chart file I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("chart drawing error: {0}")]
    Draw(String),
}

fn draw_err<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Draw(e.to_string())
}

fn rgb(c: Rgb) -> RGBColor {
    RGBColor(c.0, c.1, c.2)
}

/// 위치마다 `<dir>/<file_stem>.png` 파일 하나를 유지하는 렌더러.
#[derive(Debug, Clone)]
pub struct PngChartRenderer {
    dir: PathBuf,
    size: (u32, u32),
}

impl PngChartRenderer {
    pub fn new(dir: impl Into<PathBuf>, size: (u32, u32)) -> Self {
        Self {
            dir: dir.into(),
            size,
        }
    }

    pub fn path_for(&self, slot: ChartSlot) -> PathBuf {
        self.dir.join(format!("{}.png", slot.file_stem()))
    }
}

impl ChartRenderer for PngChartRenderer {
    type Instance = PathBuf;
    type Error = ChartError;

    fn draw(&mut self, slot: ChartSlot, chart: &ChartPayload) -> Result<PathBuf, ChartError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(slot);
        match chart.kind {
            ChartKind::Bar => draw_bar(&path, self.size, chart)?,
            ChartKind::Pie => draw_pie(&path, self.size, chart)?,
        }
        tracing::debug!(path = %path.display(), "chart written");
        Ok(path)
    }

    fn release(&mut self, _slot: ChartSlot, instance: PathBuf) -> Result<(), ChartError> {
        match fs::remove_file(&instance) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

fn draw_bar(path: &Path, size: (u32, u32), chart: &ChartPayload) -> Result<(), ChartError> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let max = chart.max_value();
    let top = if max > 0.0 { max * 1.1 } else { 1.0 };
    let count = chart.data.len() as u32;
    let labels: Vec<&str> = chart.data.iter().map(|d| d.label.as_str()).collect();

    let mut ctx = ChartBuilder::on(&root)
        .caption(&chart.title, ("sans-serif", 36).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d((0u32..count).into_segmented(), 0f64..top)
        .map_err(draw_err)?;

    ctx.configure_mesh()
        .disable_x_mesh()
        .y_desc(chart.axis_label.as_deref().unwrap_or(""))
        .x_label_formatter(&|v: &SegmentValue<u32>| match v {
            SegmentValue::CenterOf(i) => labels
                .get(*i as usize)
                .map(|s| s.to_string())
                .unwrap_or_default(),
            _ => String::new(),
        })
        .draw()
        .map_err(draw_err)?;

    for (i, datum) in chart.data.iter().enumerate() {
        ctx.draw_series(
            Histogram::vertical(&ctx)
                .style(rgb(datum.color).mix(FILL_ALPHA).filled())
                .margin(60)
                .data(std::iter::once((i as u32, datum.value))),
        )
        .map_err(draw_err)?;
    }

    root.present().map_err(draw_err)?;
    Ok(())
}

/// 중심에서 시작하는 부채꼴 다각형 꼭짓점.
fn wedge(center: (i32, i32), radius: f64, start: f64, sweep: f64) -> Vec<(i32, i32)> {
    let steps = (sweep / (2.0 * PI) * 180.0).ceil().max(2.0) as usize;
    let mut points = Vec::with_capacity(steps + 2);
    points.push(center);
    for k in 0..=steps {
        let a = start + sweep * k as f64 / steps as f64;
        points.push((
            center.0 + (radius * a.cos()).round() as i32,
            center.1 + (radius * a.sin()).round() as i32,
        ));
    }
    points
}

fn draw_pie(path: &Path, size: (u32, u32), chart: &ChartPayload) -> Result<(), ChartError> {
    const LEGEND_WIDTH: i32 = 300;

    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;
    let area = root
        .titled(&chart.title, ("sans-serif", 36))
        .map_err(draw_err)?;

    let (w, h) = area.dim_in_pixel();
    let center = ((w as i32 - LEGEND_WIDTH) / 2, h as i32 / 2);
    let radius = (center.0.min(center.1) - 20).max(10) as f64;
    let shares = chart.shares();

    // 12시 방향부터 시계 방향으로
    let mut start = -PI / 2.0;
    for (datum, share) in chart.data.iter().zip(&shares) {
        if *share <= 0.0 {
            continue;
        }
        let sweep = share * 2.0 * PI;
        area.draw(&Polygon::new(
            wedge(center, radius, start, sweep),
            rgb(datum.color).mix(FILL_ALPHA).filled(),
        ))
        .map_err(draw_err)?;
        start += sweep;
    }

    if shares.iter().all(|s| *s == 0.0) {
        area.draw(&Text::new(
            "No cost recorded",
            (center.0 - 70, center.1),
            ("sans-serif", 20).into_font(),
        ))
        .map_err(draw_err)?;
    }

    let x = w as i32 - LEGEND_WIDTH + 10;
    for (i, (datum, share)) in chart.data.iter().zip(&shares).enumerate() {
        let y = 30 + i as i32 * 28;
        area.draw(&Rectangle::new(
            [(x, y), (x + 16, y + 16)],
            rgb(datum.color).filled(),
        ))
        .map_err(draw_err)?;
        area.draw(&Text::new(
            format!("{} {:.1}%", datum.label, share * 100.0),
            (x + 24, y),
            ("sans-serif", 16).into_font(),
        ))
        .map_err(draw_err)?;
    }

    root.present().map_err(draw_err)?;
    Ok(())
}
