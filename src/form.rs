//! 입력 폼 상태와 유효성 검사.

use std::collections::BTreeMap;

use crate::fields::InputField;
use crate::input::{namespaced_id, FieldSource, InputRecord};
use crate::workflow::Workflow;

/// 필드 하나의 유효성. 키 입력마다 갱신되는 표시용 상태이며 계산을 일으키지 않는다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValidity {
    Valid,
    /// 필수 필드가 비어 있음
    Missing,
    /// 숫자로 해석할 수 없음
    NotANumber,
    /// 0 미만
    Negative,
}

impl FieldValidity {
    pub fn is_valid(self) -> bool {
        self == FieldValidity::Valid
    }

    pub fn describe(self) -> &'static str {
        match self {
            FieldValidity::Valid => "ok",
            FieldValidity::Missing => "required",
            FieldValidity::NotANumber => "not a number",
            FieldValidity::Negative => "must not be negative",
        }
    }
}

/// 필드 텍스트의 유효성을 판정한다.
pub fn check_field(text: &str) -> FieldValidity {
    let t = text.trim();
    if t.is_empty() {
        return FieldValidity::Missing;
    }
    match t.parse::<f64>() {
        Ok(v) if !v.is_finite() => FieldValidity::NotANumber,
        Ok(v) if v < 0.0 => FieldValidity::Negative,
        Ok(_) => FieldValidity::Valid,
        Err(_) => FieldValidity::NotANumber,
    }
}

/// 제출 시점의 유효성 검사 실패. 잘못된 필드 id를 모두 담는다.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("please fill in all required fields with valid values ({} invalid)", .invalid.len())]
pub struct ValidationError {
    pub invalid: Vec<(String, FieldValidity)>,
}

/// 두 공정의 입력 필드 텍스트 30개를 보관한다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    values: BTreeMap<String, String>,
}

impl FormState {
    /// 모든 필드가 빈 폼.
    pub fn new() -> Self {
        let mut values = BTreeMap::new();
        for wf in Workflow::ALL {
            for field in InputField::all() {
                values.insert(namespaced_id(wf, field), String::new());
            }
        }
        Self { values }
    }

    pub fn text(&self, workflow: Workflow, field: InputField) -> &str {
        self.values
            .get(&namespaced_id(workflow, field))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// GUI 텍스트 편집기가 직접 쓰는 가변 참조.
    pub fn text_mut(&mut self, workflow: Workflow, field: InputField) -> &mut String {
        self.values.entry(namespaced_id(workflow, field)).or_default()
    }

    pub fn set_text(&mut self, workflow: Workflow, field: InputField, text: impl Into<String>) {
        *self.text_mut(workflow, field) = text.into();
    }

    pub fn validity(&self, workflow: Workflow, field: InputField) -> FieldValidity {
        check_field(self.text(workflow, field))
    }

    /// 모든 필드가 유효한지 검사한다. 하나라도 틀리면 계산을 막는다.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let invalid: Vec<_> = Workflow::ALL
            .iter()
            .flat_map(|wf| InputField::all().map(move |f| (*wf, f)))
            .filter_map(|(wf, f)| {
                let v = self.validity(wf, f);
                (!v.is_valid()).then(|| (namespaced_id(wf, f), v))
            })
            .collect();
        if invalid.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { invalid })
        }
    }

    /// 저장된 레코드로 공정의 필드를 채운다.
    pub fn populate(&mut self, workflow: Workflow, record: &InputRecord) {
        for (field, value) in record.values() {
            self.set_text(workflow, field, value.to_string());
        }
    }
}

impl FieldSource for FormState {
    fn field_text(&self, id: &str) -> Option<&str> {
        self.values.get(id).map(String::as_str)
    }
}
