//! 계산 트리거 흐름 테스트: 검증 차단, 계산, 저장 후 복원.
use plate_cost_calculator::fields::InputField;
use plate_cost_calculator::form::{FieldValidity, FormState};
use plate_cost_calculator::persistence::MemoryStore;
use plate_cost_calculator::session::{calculate, Session};
use plate_cost_calculator::workflow::Workflow;

const EXAMPLE: [(InputField, &str); 15] = [
    (InputField::DeveloperPrice, "10"),
    (InputField::DeveloperConsumption, "2"),
    (InputField::PlatePrice, "50"),
    (InputField::EquipmentPrice, "2400"),
    (InputField::DepreciationYears, "2"),
    (InputField::PowerConsumption, "5"),
    (InputField::OperatingTime, "100"),
    (InputField::ElectricityPrice, "1"),
    (InputField::LaborSalary, "6000"),
    (InputField::WorkDays, "22"),
    (InputField::DailyHours, "8"),
    (InputField::WastewaterVolume, "10"),
    (InputField::WastewaterPrice, "3"),
    (InputField::WaterConsumption, "20"),
    (InputField::WaterPrice, "2"),
];

fn filled_form() -> FormState {
    let mut form = FormState::new();
    for wf in Workflow::ALL {
        for (field, text) in EXAMPLE {
            form.set_text(wf, field, text);
        }
    }
    // 무현상판은 현상액과 폐수가 없다
    for field in [
        InputField::DeveloperConsumption,
        InputField::WastewaterVolume,
        InputField::WaterConsumption,
    ] {
        form.set_text(Workflow::ChemistryFree, field, "0");
    }
    form
}

#[test]
fn invalid_field_blocks_calculation() {
    let mut form = filled_form();
    form.set_text(Workflow::ChemistryFree, InputField::PlatePrice, "fifty");
    let err = calculate(&form).unwrap_err();
    assert_eq!(
        err.invalid,
        vec![("fl-plate-price".to_string(), FieldValidity::NotANumber)]
    );
}

#[test]
fn calculation_produces_table_and_charts() {
    let outcome = calculate(&filled_form()).unwrap();
    let tr = &outcome.result.traditional;
    assert!((tr.total_monthly_cost - 774.090909).abs() < 1e-5);
    let fl = &outcome.result.chemistry_free;
    assert!((fl.total_monthly_cost - 684.090909).abs() < 1e-5);

    assert_eq!(outcome.rows.len(), 8);
    let total_row = &outcome.rows[6];
    assert_eq!(total_row.cells()[2], "-90.00");
    assert_eq!(total_row.preferred, Some(Workflow::ChemistryFree));
    assert!(total_row.significant);
    assert_eq!(outcome.charts.len(), 4);
}

#[test]
fn saved_inputs_repopulate_a_new_form() {
    let mut session = Session::new(MemoryStore::new());
    let outcome = calculate(&filled_form()).unwrap();
    session.save(&outcome.inputs).unwrap();

    let mut form = FormState::new();
    assert_eq!(session.restore_into(&mut form), 2);
    assert_eq!(form.text(Workflow::Traditional, InputField::LaborSalary), "6000");
    assert_eq!(form.text(Workflow::ChemistryFree, InputField::WaterConsumption), "0");
    let again = calculate(&form).unwrap();
    assert_eq!(again.inputs, outcome.inputs);

    session.clear().unwrap();
    assert_eq!(session.restore_into(&mut FormState::new()), 0);
}
