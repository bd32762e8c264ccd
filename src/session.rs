//! 계산 트리거 흐름: 검증 → 입력 읽기 → 비교 → 표/차트 구성, 그리고 저장/복원.

use crate::comparison::{compare, ComparisonResult};
use crate::form::{FormState, ValidationError};
use crate::input::{read_pair, InputPair};
use crate::persistence::{self, KeyValueStore, StorageError};
use crate::presentation::{build_charts, build_table, ChartPayload, ChartSlot, ComparisonRow};
use crate::workflow::Workflow;

/// 계산 한 번의 결과 묶음. 다음 트리거에서 통째로 바뀐다.
#[derive(Debug, Clone)]
pub struct CalculationOutcome {
    pub inputs: InputPair,
    pub result: ComparisonResult,
    pub rows: Vec<ComparisonRow>,
    pub charts: [(ChartSlot, ChartPayload); 4],
}

/// 폼을 검증한 뒤 두 공정의 비용을 비교한다. 잘못된 필드가 있으면 아무것도 계산하지 않는다.
pub fn calculate(form: &FormState) -> Result<CalculationOutcome, ValidationError> {
    form.validate()?;
    let inputs = read_pair(form);
    let result = compare(&inputs);
    tracing::info!(
        fl_total = result.chemistry_free.total_monthly_cost,
        tr_total = result.traditional.total_monthly_cost,
        fl_unit = result.chemistry_free.unit_cost,
        tr_unit = result.traditional.unit_cost,
        "calculation results"
    );
    tracing::debug!(?result, "cost breakdown");
    Ok(CalculationOutcome {
        inputs,
        rows: build_table(&result),
        charts: build_charts(&result),
        result,
    })
}

/// 저장소를 소유하는 실행 세션.
#[derive(Debug)]
pub struct Session<S> {
    store: S,
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// 저장된 입력으로 폼을 채운다. 복원한 공정 수를 돌려준다.
    pub fn restore_into(&self, form: &mut FormState) -> usize {
        let saved = persistence::load(&self.store);
        let mut restored = 0;
        for wf in Workflow::ALL {
            if let Some(record) = saved.get(wf) {
                form.populate(wf, record);
                restored += 1;
            }
        }
        restored
    }

    /// 계산에 쓰인 입력을 다음 실행을 위해 저장한다.
    pub fn save(&mut self, inputs: &InputPair) -> Result<(), StorageError> {
        persistence::save(&mut self.store, inputs)
    }

    pub fn clear(&mut self) -> Result<(), StorageError> {
        persistence::clear(&mut self.store)
    }
}
