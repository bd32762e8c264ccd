use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::fields::InputField;
use crate::workflow::Workflow;

/// 공정 하나의 비용 계산 입력.
///
/// 저장소에는 camelCase 키의 JSON 객체로 기록된다. 빠진 키는 0으로 읽는다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InputRecord {
    /// 현상액 단가 [CNY/L]
    pub developer_price: f64,
    /// 현상액 사용량 [L/월]
    pub developer_consumption: f64,
    /// 판재 비용 [CNY/월]
    pub plate_price: f64,
    /// 설비 가격 [CNY]
    pub equipment_price: f64,
    /// 감가상각 기간 [년]
    pub depreciation_years: f64,
    /// 소비 전력 [kW]
    pub power_consumption: f64,
    /// 가동 시간 [h/월]
    pub operating_time: f64,
    /// 전기 단가 [CNY/kWh]
    pub electricity_price: f64,
    /// 월 급여 [CNY/월]
    pub labor_salary: f64,
    /// 월 근무일수
    pub work_days: f64,
    /// 일 근무시간 [h]
    pub daily_hours: f64,
    /// 폐수량 [m³/월]
    pub wastewater_volume: f64,
    /// 폐수 처리 단가 [CNY/m³]
    pub wastewater_price: f64,
    /// 세척수 사용량 [m³/월]
    pub water_consumption: f64,
    /// 세척수 단가 [CNY/m³]
    pub water_price: f64,
}

impl InputRecord {
    pub fn get(&self, field: InputField) -> f64 {
        match field {
            InputField::DeveloperPrice => self.developer_price,
            InputField::DeveloperConsumption => self.developer_consumption,
            InputField::PlatePrice => self.plate_price,
            InputField::EquipmentPrice => self.equipment_price,
            InputField::DepreciationYears => self.depreciation_years,
            InputField::PowerConsumption => self.power_consumption,
            InputField::OperatingTime => self.operating_time,
            InputField::ElectricityPrice => self.electricity_price,
            InputField::LaborSalary => self.labor_salary,
            InputField::WorkDays => self.work_days,
            InputField::DailyHours => self.daily_hours,
            InputField::WastewaterVolume => self.wastewater_volume,
            InputField::WastewaterPrice => self.wastewater_price,
            InputField::WaterConsumption => self.water_consumption,
            InputField::WaterPrice => self.water_price,
        }
    }

    pub fn set(&mut self, field: InputField, value: f64) {
        let slot = match field {
            InputField::DeveloperPrice => &mut self.developer_price,
            InputField::DeveloperConsumption => &mut self.developer_consumption,
            InputField::PlatePrice => &mut self.plate_price,
            InputField::EquipmentPrice => &mut self.equipment_price,
            InputField::DepreciationYears => &mut self.depreciation_years,
            InputField::PowerConsumption => &mut self.power_consumption,
            InputField::OperatingTime => &mut self.operating_time,
            InputField::ElectricityPrice => &mut self.electricity_price,
            InputField::LaborSalary => &mut self.labor_salary,
            InputField::WorkDays => &mut self.work_days,
            InputField::DailyHours => &mut self.daily_hours,
            InputField::WastewaterVolume => &mut self.wastewater_volume,
            InputField::WastewaterPrice => &mut self.wastewater_price,
            InputField::WaterConsumption => &mut self.water_consumption,
            InputField::WaterPrice => &mut self.water_price,
        };
        *slot = value;
    }

    /// 필드 순서대로 (필드, 값) 쌍을 돌려준다.
    pub fn values(&self) -> impl Iterator<Item = (InputField, f64)> + '_ {
        InputField::all().map(move |f| (f, self.get(f)))
    }
}

/// 두 공정의 입력 묶음.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputPair {
    pub chemistry_free: InputRecord,
    pub traditional: InputRecord,
}

impl InputPair {
    pub fn get(&self, workflow: Workflow) -> &InputRecord {
        match workflow {
            Workflow::ChemistryFree => &self.chemistry_free,
            Workflow::Traditional => &self.traditional,
        }
    }
}

/// 이름 붙은 필드 텍스트를 제공하는 입력원. 없는 필드는 `None`.
pub trait FieldSource {
    fn field_text(&self, id: &str) -> Option<&str>;
}

impl FieldSource for HashMap<String, String> {
    fn field_text(&self, id: &str) -> Option<&str> {
        self.get(id).map(String::as_str)
    }
}

impl FieldSource for BTreeMap<String, String> {
    fn field_text(&self, id: &str) -> Option<&str> {
        self.get(id).map(String::as_str)
    }
}

impl<S: FieldSource + ?Sized> FieldSource for &S {
    fn field_text(&self, id: &str) -> Option<&str> {
        (**self).field_text(id)
    }
}

/// 네임스페이스가 붙은 전체 필드 id. 예: `fl-developer-price`
pub fn namespaced_id(workflow: Workflow, field: InputField) -> String {
    format!("{}{}", workflow.prefix(), field.form_id())
}

/// `fl-work-days` 같은 전체 id를 공정과 필드로 나눈다.
pub fn parse_namespaced_id(id: &str) -> Option<(Workflow, InputField)> {
    Workflow::ALL.iter().find_map(|wf| {
        id.strip_prefix(wf.prefix())
            .and_then(InputField::from_form_id)
            .map(|field| (*wf, field))
    })
}

/// 필드 텍스트를 수치로 읽는다. 비었거나 해석할 수 없거나 유한하지 않으면 0.
pub fn parse_field(text: Option<&str>) -> f64 {
    text.map(str::trim)
        .and_then(|t| t.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// 공정 네임스페이스의 필드를 모두 읽어 입력 레코드를 만든다. 오류 없이 0으로 대체한다.
pub fn read_inputs<S: FieldSource + ?Sized>(workflow: Workflow, source: &S) -> InputRecord {
    let mut record = InputRecord::default();
    for field in InputField::all() {
        let id = namespaced_id(workflow, field);
        record.set(field, parse_field(source.field_text(&id)));
    }
    record
}

/// 두 공정의 입력을 함께 읽는다.
pub fn read_pair<S: FieldSource + ?Sized>(source: &S) -> InputPair {
    InputPair {
        chemistry_free: read_inputs(Workflow::ChemistryFree, source),
        traditional: read_inputs(Workflow::Traditional, source),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn parse_defaults_to_zero() {
        assert_eq!(parse_field(None), 0.0);
        assert_eq!(parse_field(Some("")), 0.0);
        assert_eq!(parse_field(Some("   ")), 0.0);
        assert_eq!(parse_field(Some("abc")), 0.0);
        assert_eq!(parse_field(Some("NaN")), 0.0);
        assert_eq!(parse_field(Some("inf")), 0.0);
        assert_eq!(parse_field(Some(" 12.5 ")), 12.5);
        assert_eq!(parse_field(Some("1e3")), 1000.0);
    }

    #[test]
    fn reads_only_its_namespace() {
        let src = source(&[
            ("fl-developer-price", "10"),
            ("tr-developer-price", "20"),
            ("fl-work-days", "22"),
            ("developer-price", "99"),
        ]);
        let fl = read_inputs(Workflow::ChemistryFree, &src);
        let tr = read_inputs(Workflow::Traditional, &src);
        assert_eq!(fl.developer_price, 10.0);
        assert_eq!(fl.work_days, 22.0);
        assert_eq!(tr.developer_price, 20.0);
        assert_eq!(tr.work_days, 0.0);
    }

    #[test]
    fn namespaced_ids_split_back() {
        for wf in Workflow::ALL {
            for field in InputField::all() {
                assert_eq!(parse_namespaced_id(&namespaced_id(wf, field)), Some((wf, field)));
            }
        }
        assert_eq!(parse_namespaced_id("xx-work-days"), None);
        assert_eq!(parse_namespaced_id("fl-workDays"), None);
    }

    #[test]
    fn missing_everything_is_all_zero() {
        let pair = read_pair(&HashMap::new());
        assert_eq!(pair, InputPair::default());
    }

    #[test]
    fn get_and_set_cover_every_field() {
        let mut record = InputRecord::default();
        for (i, field) in InputField::all().enumerate() {
            record.set(field, i as f64 + 1.0);
        }
        for (i, (field, value)) in record.values().enumerate() {
            assert_eq!(value, i as f64 + 1.0, "{field:?}");
        }
    }
}
