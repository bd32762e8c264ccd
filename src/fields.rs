//! 입력 필드 이름표. 저장 키(camelCase)와 폼 필드 id(kebab-case)를 명시적으로 대응시킨다.

/// 입력 폼의 묶음.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSection {
    /// 재료비
    Material,
    /// 설비비
    Equipment,
    /// 인건비
    Labor,
    /// 환경 비용
    Environment,
}

impl FieldSection {
    pub const ALL: [FieldSection; 4] = [
        FieldSection::Material,
        FieldSection::Equipment,
        FieldSection::Labor,
        FieldSection::Environment,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FieldSection::Material => "Material",
            FieldSection::Equipment => "Equipment",
            FieldSection::Labor => "Labor",
            FieldSection::Environment => "Environment",
        }
    }
}

/// 공정별 입력 레코드를 구성하는 15개 수치 필드.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputField {
    DeveloperPrice,
    DeveloperConsumption,
    PlatePrice,
    EquipmentPrice,
    DepreciationYears,
    PowerConsumption,
    OperatingTime,
    ElectricityPrice,
    LaborSalary,
    WorkDays,
    DailyHours,
    WastewaterVolume,
    WastewaterPrice,
    WaterConsumption,
    WaterPrice,
}

/// 필드 하나의 이름표 항목.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub field: InputField,
    /// 저장소 JSON 키
    pub storage_key: &'static str,
    /// 네임스페이스를 뺀 폼 필드 id
    pub form_id: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
    pub section: FieldSection,
}

const fn spec(
    field: InputField,
    storage_key: &'static str,
    form_id: &'static str,
    label: &'static str,
    unit: &'static str,
    section: FieldSection,
) -> FieldSpec {
    FieldSpec {
        field,
        storage_key,
        form_id,
        label,
        unit,
        section,
    }
}

/// 폼 표시 순서를 따르는 전체 이름표.
pub static FIELD_TABLE: [FieldSpec; 15] = [
    spec(InputField::DeveloperPrice, "developerPrice", "developer-price", "Developer unit price", "CNY/L", FieldSection::Material),
    spec(InputField::DeveloperConsumption, "developerConsumption", "developer-consumption", "Developer consumption", "L/month", FieldSection::Material),
    spec(InputField::PlatePrice, "platePrice", "plate-price", "Plate cost", "CNY/month", FieldSection::Material),
    spec(InputField::EquipmentPrice, "equipmentPrice", "equipment-price", "Equipment price", "CNY", FieldSection::Equipment),
    spec(InputField::DepreciationYears, "depreciationYears", "depreciation-years", "Depreciation period", "years", FieldSection::Equipment),
    spec(InputField::PowerConsumption, "powerConsumption", "power-consumption", "Power draw", "kW", FieldSection::Equipment),
    spec(InputField::OperatingTime, "operatingTime", "operating-time", "Operating time", "h/month", FieldSection::Equipment),
    spec(InputField::ElectricityPrice, "electricityPrice", "electricity-price", "Electricity price", "CNY/kWh", FieldSection::Equipment),
    spec(InputField::LaborSalary, "laborSalary", "labor-salary", "Monthly salary", "CNY/month", FieldSection::Labor),
    spec(InputField::WorkDays, "workDays", "work-days", "Working days", "days/month", FieldSection::Labor),
    spec(InputField::DailyHours, "dailyHours", "daily-hours", "Daily working hours", "h/day", FieldSection::Labor),
    spec(InputField::WastewaterVolume, "wastewaterVolume", "wastewater-volume", "Wastewater volume", "m³/month", FieldSection::Environment),
    spec(InputField::WastewaterPrice, "wastewaterPrice", "wastewater-price", "Wastewater treatment price", "CNY/m³", FieldSection::Environment),
    spec(InputField::WaterConsumption, "waterConsumption", "water-consumption", "Fresh water consumption", "m³/month", FieldSection::Environment),
    spec(InputField::WaterPrice, "waterPrice", "water-price", "Fresh water price", "CNY/m³", FieldSection::Environment),
];

impl InputField {
    /// 이름표 순서대로 모든 필드를 돌려준다.
    pub fn all() -> impl Iterator<Item = InputField> {
        FIELD_TABLE.iter().map(|s| s.field)
    }

    pub fn spec(self) -> &'static FieldSpec {
        // FIELD_TABLE은 열거형 선언 순서와 같다.
        &FIELD_TABLE[self as usize]
    }

    pub fn storage_key(self) -> &'static str {
        self.spec().storage_key
    }

    pub fn form_id(self) -> &'static str {
        self.spec().form_id
    }

    pub fn label(self) -> &'static str {
        self.spec().label
    }

    pub fn unit(self) -> &'static str {
        self.spec().unit
    }

    pub fn section(self) -> FieldSection {
        self.spec().section
    }

    /// 저장 키로 필드를 찾는다.
    pub fn from_storage_key(key: &str) -> Option<InputField> {
        FIELD_TABLE
            .iter()
            .find(|s| s.storage_key == key)
            .map(|s| s.field)
    }

    /// 네임스페이스 없는 폼 id로 필드를 찾는다.
    pub fn from_form_id(id: &str) -> Option<InputField> {
        FIELD_TABLE.iter().find(|s| s.form_id == id).map(|s| s.field)
    }

    /// 섹션에 속한 필드를 표시 순서대로 돌려준다.
    pub fn in_section(section: FieldSection) -> impl Iterator<Item = InputField> {
        FIELD_TABLE
            .iter()
            .filter(move |s| s.section == section)
            .map(|s| s.field)
    }
}
