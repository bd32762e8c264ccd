use crate::input::InputRecord;

/// 단위 비용 환산에 쓰는 월 기준 생산 면적 [m²/월].
///
/// 사용자 입력에서 오지 않는 고정값이므로 단위 비용은 두 공정 간 상대 비교에만 의미가 있다.
pub const NOMINAL_AREA_M2: f64 = 1000.0;

/// 공정 하나의 월 비용 내역 [CNY/월]. 계산 후 변경하지 않는다.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CostBreakdown {
    /// 재료비 = 현상액 단가 × 사용량 + 판재비
    pub material_cost: f64,
    /// 설비 감가상각비 = 설비 가격 / (상각 연수 × 12)
    pub depreciation_cost: f64,
    /// 에너지비 = 전력 × 가동시간 × 전기 단가
    pub energy_cost: f64,
    /// 폐수 처리비 = 폐수량 × 처리 단가
    pub wastewater_treatment_cost: f64,
    /// 세척수 비용 = 사용량 × 단가
    pub water_consumption_cost: f64,
    /// 인건비 = (월급 / 근무일수) / 일 근무시간
    pub labor_cost: f64,
    /// 위 여섯 항목의 합
    pub total_monthly_cost: f64,
    /// 총 월비용 / 기준 면적 [CNY/m²]
    pub unit_cost: f64,
}

/// 입력 레코드 하나로 비용 내역을 계산한다.
///
/// 분모가 0 이하인 항목은 오류 대신 0으로 처리한다.
pub fn compute_breakdown(input: &InputRecord) -> CostBreakdown {
    let material_cost = input.developer_price * input.developer_consumption + input.plate_price;

    let depreciation_cost = if input.depreciation_years > 0.0 {
        input.equipment_price / (input.depreciation_years * 12.0)
    } else {
        0.0
    };

    let energy_cost = input.power_consumption * input.operating_time * input.electricity_price;
    let wastewater_treatment_cost = input.wastewater_volume * input.wastewater_price;
    let water_consumption_cost = input.water_consumption * input.water_price;

    let labor_cost = if input.work_days * input.daily_hours > 0.0 {
        (input.labor_salary / input.work_days) / input.daily_hours
    } else {
        0.0
    };

    let total_monthly_cost = material_cost
        + depreciation_cost
        + energy_cost
        + wastewater_treatment_cost
        + water_consumption_cost
        + labor_cost;

    CostBreakdown {
        material_cost,
        depreciation_cost,
        energy_cost,
        wastewater_treatment_cost,
        water_consumption_cost,
        labor_cost,
        total_monthly_cost,
        unit_cost: total_monthly_cost / NOMINAL_AREA_M2,
    }
}

/// 표와 차트에 나오는 비용 항목. 앞의 여섯 개가 구성 항목이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CostCategory {
    Material,
    Depreciation,
    Energy,
    WastewaterTreatment,
    WaterConsumption,
    Labor,
    TotalMonthly,
    Unit,
}

impl CostCategory {
    /// 표 행 순서.
    pub const ALL: [CostCategory; 8] = [
        CostCategory::Material,
        CostCategory::Depreciation,
        CostCategory::Energy,
        CostCategory::WastewaterTreatment,
        CostCategory::WaterConsumption,
        CostCategory::Labor,
        CostCategory::TotalMonthly,
        CostCategory::Unit,
    ];

    /// 총 월비용을 이루는 여섯 항목.
    pub const COMPONENTS: [CostCategory; 6] = [
        CostCategory::Material,
        CostCategory::Depreciation,
        CostCategory::Energy,
        CostCategory::WastewaterTreatment,
        CostCategory::WaterConsumption,
        CostCategory::Labor,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CostCategory::Material => "Material cost",
            CostCategory::Depreciation => "Equipment depreciation",
            CostCategory::Energy => "Energy cost",
            CostCategory::WastewaterTreatment => "Wastewater treatment",
            CostCategory::WaterConsumption => "Fresh water",
            CostCategory::Labor => "Labor cost",
            CostCategory::TotalMonthly => "Total monthly cost",
            CostCategory::Unit => "Unit cost (CNY/m²)",
        }
    }

    pub fn value_of(self, b: &CostBreakdown) -> f64 {
        match self {
            CostCategory::Material => b.material_cost,
            CostCategory::Depreciation => b.depreciation_cost,
            CostCategory::Energy => b.energy_cost,
            CostCategory::WastewaterTreatment => b.wastewater_treatment_cost,
            CostCategory::WaterConsumption => b.water_consumption_cost,
            CostCategory::Labor => b.labor_cost,
            CostCategory::TotalMonthly => b.total_monthly_cost,
            CostCategory::Unit => b.unit_cost,
        }
    }
}

impl CostBreakdown {
    /// 구성 항목 여섯 개의 값.
    pub fn components(&self) -> [f64; 6] {
        CostCategory::COMPONENTS.map(|c| c.value_of(self))
    }
}
