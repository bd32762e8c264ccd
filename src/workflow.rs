/// 비교 대상인 두 가지 판재 제작 공정.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Workflow {
    /// 무현상(chemistry-free) 판재. 화학 현상 공정이 없다.
    ChemistryFree,
    /// 기존 현상 판재. 현상액, 폐수, 세척수를 소모한다.
    Traditional,
}

impl Workflow {
    /// 표시 순서대로 두 공정을 나열한다.
    pub const ALL: [Workflow; 2] = [Workflow::ChemistryFree, Workflow::Traditional];

    /// 입력 필드 id 앞에 붙는 네임스페이스.
    pub fn prefix(self) -> &'static str {
        match self {
            Workflow::ChemistryFree => "fl-",
            Workflow::Traditional => "tr-",
        }
    }

    /// 비교 결과에서 쓰는 고정 키.
    pub fn key(self) -> &'static str {
        match self {
            Workflow::ChemistryFree => "fl",
            Workflow::Traditional => "tr",
        }
    }

    /// 저장소에 입력값을 기록하는 고정 키.
    pub fn storage_key(self) -> &'static str {
        match self {
            Workflow::ChemistryFree => "flInputs",
            Workflow::Traditional => "trInputs",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Workflow::ChemistryFree => "Chemistry-free plate",
            Workflow::Traditional => "Traditional plate",
        }
    }
}

impl std::fmt::Display for Workflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
