use crate::cost_model::{compute_breakdown, CostBreakdown};
use crate::input::InputPair;
use crate::workflow::Workflow;

/// 두 공정의 비용 내역 쌍. 표시 직후 버려지며 저장하지 않는다.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ComparisonResult {
    /// `fl`
    pub chemistry_free: CostBreakdown,
    /// `tr`
    pub traditional: CostBreakdown,
}

impl ComparisonResult {
    pub fn get(&self, workflow: Workflow) -> &CostBreakdown {
        match workflow {
            Workflow::ChemistryFree => &self.chemistry_free,
            Workflow::Traditional => &self.traditional,
        }
    }
}

/// 공정마다 비용 모델을 한 번씩 돌린다.
pub fn compare(inputs: &InputPair) -> ComparisonResult {
    ComparisonResult {
        chemistry_free: compute_breakdown(&inputs.chemistry_free),
        traditional: compute_breakdown(&inputs.traditional),
    }
}
