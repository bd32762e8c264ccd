use crate::comparison::ComparisonResult;
use crate::cost_model::CostCategory;
use crate::workflow::Workflow;

/// 채우기 색의 불투명도. 테두리는 불투명하다.
pub const FILL_ALPHA: f64 = 0.6;

/// 8비트 RGB 색.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const TEAL: Rgb = Rgb(75, 192, 192);
pub const ROSE: Rgb = Rgb(255, 99, 132);
pub const ORANGE: Rgb = Rgb(255, 159, 64);

/// 구성 항목 원그래프 팔레트.
pub const COMPOSITION_PALETTE: [Rgb; 6] = [
    Rgb(255, 99, 132),
    Rgb(54, 162, 235),
    Rgb(255, 206, 86),
    Rgb(75, 192, 192),
    Rgb(153, 102, 255),
    Rgb(255, 159, 64),
];

/// 차트가 그려지는 고정 위치. 위치마다 그려진 차트는 최대 하나다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartSlot {
    TotalCost,
    ChemistryFreeComposition,
    TraditionalComposition,
    UnitCost,
}

impl ChartSlot {
    pub const ALL: [ChartSlot; 4] = [
        ChartSlot::TotalCost,
        ChartSlot::ChemistryFreeComposition,
        ChartSlot::TraditionalComposition,
        ChartSlot::UnitCost,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// 이미지 내보내기 파일 이름(확장자 제외).
    pub fn file_stem(self) -> &'static str {
        match self {
            ChartSlot::TotalCost => "total_cost",
            ChartSlot::ChemistryFreeComposition => "fl_cost_composition",
            ChartSlot::TraditionalComposition => "tr_cost_composition",
            ChartSlot::UnitCost => "unit_cost",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Pie,
}

/// 막대 하나 또는 조각 하나.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartDatum {
    pub label: String,
    pub value: f64,
    pub color: Rgb,
}

/// 렌더러에 넘기는 차트 내용.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPayload {
    pub kind: ChartKind,
    pub title: String,
    /// 막대그래프 세로축 이름
    pub axis_label: Option<String>,
    pub data: Vec<ChartDatum>,
}

impl ChartPayload {
    pub fn max_value(&self) -> f64 {
        self.data.iter().map(|d| d.value).fold(0.0, f64::max)
    }

    /// 원그래프 조각 비율. 합계가 0 이하이면 모두 0.
    pub fn shares(&self) -> Vec<f64> {
        let total: f64 = self.data.iter().map(|d| d.value.max(0.0)).sum();
        self.data
            .iter()
            .map(|d| {
                if total > 0.0 {
                    d.value.max(0.0) / total
                } else {
                    0.0
                }
            })
            .collect()
    }
}

fn comparison_bars(
    title: &str,
    axis_label: &str,
    category: CostCategory,
    result: &ComparisonResult,
    colors: [Rgb; 2],
) -> ChartPayload {
    ChartPayload {
        kind: ChartKind::Bar,
        title: title.to_string(),
        axis_label: Some(axis_label.to_string()),
        data: Workflow::ALL
            .iter()
            .zip(colors)
            .map(|(wf, color)| ChartDatum {
                label: wf.label().to_string(),
                value: category.value_of(result.get(*wf)),
                color,
            })
            .collect(),
    }
}

fn composition(workflow: Workflow, result: &ComparisonResult) -> ChartPayload {
    let breakdown = result.get(workflow);
    ChartPayload {
        kind: ChartKind::Pie,
        title: format!("{} cost composition", workflow.label()),
        axis_label: None,
        data: CostCategory::COMPONENTS
            .iter()
            .zip(COMPOSITION_PALETTE)
            .map(|(c, color)| ChartDatum {
                label: c.label().to_string(),
                value: c.value_of(breakdown),
                color,
            })
            .collect(),
    }
}

/// 위치별 차트 내용 네 개를 만든다.
pub fn build_charts(result: &ComparisonResult) -> [(ChartSlot, ChartPayload); 4] {
    [
        (
            ChartSlot::TotalCost,
            comparison_bars(
                "Total monthly cost",
                "Cost (CNY)",
                CostCategory::TotalMonthly,
                result,
                [TEAL, ROSE],
            ),
        ),
        (
            ChartSlot::ChemistryFreeComposition,
            composition(Workflow::ChemistryFree, result),
        ),
        (
            ChartSlot::TraditionalComposition,
            composition(Workflow::Traditional, result),
        ),
        (
            ChartSlot::UnitCost,
            comparison_bars(
                "Unit cost comparison",
                "Unit cost (CNY/m²)",
                CostCategory::Unit,
                result,
                [TEAL, ORANGE],
            ),
        ),
    ]
}
