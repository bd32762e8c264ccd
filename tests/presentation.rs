//! 비교 표, 차트 내용, 차트 위치 등록부 테스트.
use std::path::PathBuf;

use plate_cost_calculator::comparison::{compare, ComparisonResult};
use plate_cost_calculator::cost_model::{CostBreakdown, CostCategory};
use plate_cost_calculator::input::{InputPair, InputRecord};
use plate_cost_calculator::presentation::charts::{ChartDatum, Rgb};
use plate_cost_calculator::presentation::table::percent_difference;
use plate_cost_calculator::presentation::{
    build_charts, build_table, format_amount, render_text_table, ChartKind, ChartPayload,
    ChartRenderer, ChartSlot, ChartSlots, PngChartRenderer,
};
use plate_cost_calculator::workflow::Workflow;
use tempfile::tempdir;

fn result_with_totals(fl: [f64; 6], tr: [f64; 6]) -> ComparisonResult {
    let make = |c: [f64; 6]| {
        let total: f64 = c.iter().sum();
        CostBreakdown {
            material_cost: c[0],
            depreciation_cost: c[1],
            energy_cost: c[2],
            wastewater_treatment_cost: c[3],
            water_consumption_cost: c[4],
            labor_cost: c[5],
            total_monthly_cost: total,
            unit_cost: total / 1000.0,
        }
    };
    ComparisonResult {
        chemistry_free: make(fl),
        traditional: make(tr),
    }
}

#[test]
fn formatting_uses_two_decimals() {
    assert_eq!(format_amount(34.090909), "34.09");
    assert_eq!(format_amount(-1.005), "-1.00");
    assert_eq!(format_amount(-0.001), "0.00");
    assert_eq!(format_amount(0.0), "0.00");
}

#[test]
fn rows_flag_lower_cost_and_significance() {
    let result = result_with_totals(
        [70.0, 100.0, 500.0, 0.0, 0.0, 34.0],
        [100.0, 100.0, 530.0, 30.0, 40.0, 34.0],
    );
    let rows = build_table(&result);
    assert_eq!(rows.len(), CostCategory::ALL.len());

    let material = &rows[0];
    assert_eq!(material.category, CostCategory::Material);
    assert_eq!(material.cells(), ["70.00".to_string(), "100.00".to_string(), "-30.00".to_string()]);
    assert_eq!(material.preferred, Some(Workflow::ChemistryFree));
    assert!(material.significant);
    assert_eq!(material.significance_hint().as_deref(), Some("Difference exceeds 10% (-30.00%)"));

    let depreciation = &rows[1];
    assert_eq!(depreciation.preferred, None);
    assert!(!depreciation.significant);

    // 530 대비 -30은 5.66%
    let energy = &rows[2];
    assert_eq!(energy.preferred, Some(Workflow::ChemistryFree));
    assert!(!energy.significant);
    assert_eq!(energy.significance_hint(), None);
}

#[test]
fn zero_baseline_is_never_significant() {
    let result = result_with_totals([5.0, 0.0, 0.0, 0.0, 0.0, 0.0], [0.0; 6]);
    let rows = build_table(&result);
    assert_eq!(rows[0].percent_diff, 0.0);
    assert!(!rows[0].significant);
    assert_eq!(rows[0].preferred, Some(Workflow::Traditional));
    assert_eq!(percent_difference(5.0, 0.0), 0.0);
}

#[test]
fn significance_threshold_is_strict() {
    assert_eq!(percent_difference(110.0, 100.0), 10.0);
    let rows = build_table(&result_with_totals(
        [111.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        [100.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    ));
    assert!(rows[0].significant);
    let rows = build_table(&result_with_totals(
        [105.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        [100.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    ));
    assert!(!rows[0].significant);
}

#[test]
fn text_table_marks_rows() {
    let result = result_with_totals([70.0, 0.0, 0.0, 0.0, 0.0, 0.0], [100.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
    let text = render_text_table(&build_table(&result));
    let material = text.lines().find(|l| l.starts_with("Material cost")).unwrap();
    assert!(material.contains("70.00 *"));
    assert!(material.contains("-30.00 !"));
    assert!(text.contains("Unit cost (CNY/m²)"));
}

#[test]
fn four_charts_in_fixed_slots() {
    let result = result_with_totals([1.0, 2.0, 3.0, 4.0, 5.0, 6.0], [6.0, 5.0, 4.0, 3.0, 2.0, 1.0]);
    let charts = build_charts(&result);
    let slots: Vec<_> = charts.iter().map(|(s, _)| *s).collect();
    assert_eq!(slots, ChartSlot::ALL.to_vec());

    let (_, total) = &charts[0];
    assert_eq!(total.kind, ChartKind::Bar);
    assert_eq!(total.data.len(), 2);
    assert_eq!(total.data[0].value, 21.0);

    let (_, composition) = &charts[2];
    assert_eq!(composition.kind, ChartKind::Pie);
    assert_eq!(composition.data.len(), 6);
    assert_eq!(composition.data[0].value, 6.0);
    let share_sum: f64 = composition.shares().iter().sum();
    assert!((share_sum - 1.0).abs() < 1e-12);

    let (_, unit) = &charts[3];
    assert_eq!(unit.data[1].value, 0.021);
}

#[test]
fn empty_pie_has_zero_shares() {
    let charts = build_charts(&compare(&InputPair::default()));
    assert!(charts[1].1.shares().iter().all(|s| *s == 0.0));
}

/// 호출 순서를 기록하는 렌더러.
#[derive(Default)]
struct RecordingRenderer {
    next_id: u32,
    log: Vec<String>,
}

impl ChartRenderer for RecordingRenderer {
    type Instance = u32;
    type Error = String;

    fn draw(&mut self, slot: ChartSlot, _chart: &ChartPayload) -> Result<u32, String> {
        self.next_id += 1;
        self.log.push(format!("draw {slot:?} #{}", self.next_id));
        Ok(self.next_id)
    }

    fn release(&mut self, slot: ChartSlot, instance: u32) -> Result<(), String> {
        self.log.push(format!("release {slot:?} #{instance}"));
        Ok(())
    }
}

#[test]
fn slots_release_before_each_redraw() {
    let charts = build_charts(&compare(&InputPair::default()));
    let mut slots = ChartSlots::new();
    let mut renderer = RecordingRenderer::default();
    assert!(slots.is_empty());

    slots.render_all(&mut renderer, &charts).unwrap();
    assert_eq!(renderer.log.len(), 4);
    assert_eq!(slots.get(ChartSlot::UnitCost), Some(&4));

    slots
        .replace(&mut renderer, ChartSlot::TotalCost, &charts[0].1)
        .unwrap();
    assert_eq!(
        renderer.log[4..],
        ["release TotalCost #1".to_string(), "draw TotalCost #5".to_string()]
    );

    slots.clear(&mut renderer).unwrap();
    assert!(slots.is_empty());
    assert_eq!(renderer.log.iter().filter(|l| l.starts_with("release")).count(), 5);
}

#[test]
fn png_release_removes_file_and_tolerates_missing() {
    let dir = tempdir().unwrap();
    let mut renderer = PngChartRenderer::new(dir.path(), (400, 300));
    let path = renderer.path_for(ChartSlot::TotalCost);
    assert_eq!(path, dir.path().join("total_cost.png"));
    std::fs::write(&path, b"stale").unwrap();
    renderer.release(ChartSlot::TotalCost, path.clone()).unwrap();
    assert!(!path.exists());
    renderer.release(ChartSlot::TotalCost, path).unwrap();
}

#[test]
fn png_renderer_writes_every_slot() {
    let mut fl = InputRecord::default();
    fl.plate_price = 60.0;
    fl.power_consumption = 3.0;
    fl.operating_time = 100.0;
    fl.electricity_price = 0.8;
    let mut tr = fl;
    tr.developer_price = 12.0;
    tr.developer_consumption = 4.0;
    tr.water_consumption = 10.0;
    tr.water_price = 3.0;
    let charts = build_charts(&compare(&InputPair {
        chemistry_free: fl,
        traditional: tr,
    }));

    let dir = tempdir().unwrap();
    let mut renderer = PngChartRenderer::new(dir.path(), (400, 300));
    let mut slots: ChartSlots<PathBuf> = ChartSlots::new();
    slots.render_all(&mut renderer, &charts).unwrap();
    for slot in ChartSlot::ALL {
        let path = slots.get(slot).unwrap();
        assert_eq!(path, &renderer.path_for(slot));
        assert!(path.exists(), "{}", path.display());
    }

    slots.clear(&mut renderer).unwrap();
    for slot in ChartSlot::ALL {
        assert!(!renderer.path_for(slot).exists());
    }
}

#[test]
fn shares_ignore_negative_values() {
    let chart = ChartPayload {
        kind: ChartKind::Pie,
        title: "t".into(),
        axis_label: None,
        data: vec![
            ChartDatum { label: "a".into(), value: 3.0, color: Rgb(0, 0, 0) },
            ChartDatum { label: "b".into(), value: -1.0, color: Rgb(0, 0, 0) },
            ChartDatum { label: "c".into(), value: 1.0, color: Rgb(0, 0, 0) },
        ],
    };
    assert_eq!(chart.shares(), vec![0.75, 0.0, 0.25]);
    assert_eq!(chart.max_value(), 3.0);
}
