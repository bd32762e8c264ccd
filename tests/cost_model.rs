//! 비용 모델 회귀 테스트. 계산 예제와 0 분모 처리를 확인한다.
use plate_cost_calculator::comparison::compare;
use plate_cost_calculator::cost_model::{compute_breakdown, CostCategory, NOMINAL_AREA_M2};
use plate_cost_calculator::input::{InputPair, InputRecord};
use plate_cost_calculator::workflow::Workflow;

fn assert_close(label: &str, actual: f64, expected: f64, tol: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tol,
        "{label} expected {expected:.6} got {actual:.6} (diff {diff:.6}, tol {tol})"
    );
}

fn worked_example() -> InputRecord {
    InputRecord {
        developer_price: 10.0,
        developer_consumption: 2.0,
        plate_price: 50.0,
        equipment_price: 2400.0,
        depreciation_years: 2.0,
        power_consumption: 5.0,
        operating_time: 100.0,
        electricity_price: 1.0,
        labor_salary: 6000.0,
        work_days: 22.0,
        daily_hours: 8.0,
        wastewater_volume: 10.0,
        wastewater_price: 3.0,
        water_consumption: 20.0,
        water_price: 2.0,
    }
}

#[test]
fn worked_example_breakdown() {
    let b = compute_breakdown(&worked_example());
    assert_close("material", b.material_cost, 70.0, 1e-12);
    assert_close("depreciation", b.depreciation_cost, 100.0, 1e-12);
    assert_close("energy", b.energy_cost, 500.0, 1e-12);
    assert_close("wastewater", b.wastewater_treatment_cost, 30.0, 1e-12);
    assert_close("water", b.water_consumption_cost, 40.0, 1e-12);
    assert_close("labor", b.labor_cost, 34.09, 0.005);
    assert_close("total", b.total_monthly_cost, 774.09, 0.005);
    assert_close("unit", b.unit_cost, 0.774, 0.0005);
}

#[test]
fn all_zero_inputs_give_zero_costs() {
    let b = compute_breakdown(&InputRecord::default());
    for category in CostCategory::ALL {
        assert_eq!(category.value_of(&b), 0.0, "{category:?}");
    }
}

#[test]
fn zero_depreciation_years_means_no_depreciation() {
    let mut input = worked_example();
    input.depreciation_years = 0.0;
    assert_eq!(compute_breakdown(&input).depreciation_cost, 0.0);
    input.depreciation_years = -1.0;
    assert_eq!(compute_breakdown(&input).depreciation_cost, 0.0);
}

#[test]
fn zero_working_time_means_no_labor() {
    let mut input = worked_example();
    input.work_days = 0.0;
    assert_eq!(compute_breakdown(&input).labor_cost, 0.0);
    input.work_days = 22.0;
    input.daily_hours = 0.0;
    assert_eq!(compute_breakdown(&input).labor_cost, 0.0);
}

#[test]
fn total_is_exact_sum_and_unit_is_total_over_area() {
    let mut input = worked_example();
    input.developer_price = 0.37;
    input.water_price = 1.0 / 3.0;
    input.labor_salary = 5123.45;
    let b = compute_breakdown(&input);
    let sum = b.material_cost
        + b.depreciation_cost
        + b.energy_cost
        + b.wastewater_treatment_cost
        + b.water_consumption_cost
        + b.labor_cost;
    assert_eq!(b.total_monthly_cost, sum);
    assert_eq!(b.unit_cost, b.total_monthly_cost / NOMINAL_AREA_M2);
    assert_eq!(b.components().iter().sum::<f64>(), sum);
}

#[test]
fn comparator_keys_each_workflow() {
    let mut tr = worked_example();
    tr.plate_price = 80.0;
    let result = compare(&InputPair {
        chemistry_free: worked_example(),
        traditional: tr,
    });
    assert_close("fl material", result.get(Workflow::ChemistryFree).material_cost, 70.0, 1e-12);
    assert_close("tr material", result.get(Workflow::Traditional).material_cost, 100.0, 1e-12);
}
