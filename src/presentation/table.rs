use crate::comparison::ComparisonResult;
use crate::cost_model::CostCategory;
use crate::workflow::Workflow;

/// 차이가 이 비율[%]을 넘으면 두드러진 차이로 표시한다.
pub const SIGNIFICANT_DIFF_PERCENT: f64 = 10.0;

/// 비교 표의 한 행.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub category: CostCategory,
    pub chemistry_free: f64,
    pub traditional: f64,
    /// 무현상 - 기존
    pub difference: f64,
    /// 기존 값 대비 차이 [%]. 기존 값이 0이면 0.
    pub percent_diff: f64,
    /// 더 낮은 값을 가진 공정. 같으면 `None`.
    pub preferred: Option<Workflow>,
    /// |percent_diff| > 10
    pub significant: bool,
}

impl ComparisonRow {
    pub fn label(&self) -> &'static str {
        self.category.label()
    }

    /// [무현상, 기존, 차이] 셀 텍스트.
    pub fn cells(&self) -> [String; 3] {
        [
            format_amount(self.chemistry_free),
            format_amount(self.traditional),
            format_amount(self.difference),
        ]
    }

    /// 두드러진 차이에 붙는 안내 문구.
    pub fn significance_hint(&self) -> Option<String> {
        self.significant.then(|| {
            format!(
                "Difference exceeds {SIGNIFICANT_DIFF_PERCENT:.0}% ({}%)",
                format_amount(self.percent_diff)
            )
        })
    }
}

/// 소수점 둘째 자리로 표시한다. `-0.00`은 `0.00`으로 바꾼다.
pub fn format_amount(value: f64) -> String {
    let s = format!("{value:.2}");
    if s == "-0.00" {
        "0.00".to_string()
    } else {
        s
    }
}

/// 기존 값 대비 차이 비율[%].
pub fn percent_difference(chemistry_free: f64, traditional: f64) -> f64 {
    if traditional != 0.0 {
        (chemistry_free - traditional) / traditional * 100.0
    } else {
        0.0
    }
}

fn build_row(category: CostCategory, result: &ComparisonResult) -> ComparisonRow {
    let fl = category.value_of(&result.chemistry_free);
    let tr = category.value_of(&result.traditional);
    let percent_diff = percent_difference(fl, tr);
    let preferred = if fl < tr {
        Some(Workflow::ChemistryFree)
    } else if tr < fl {
        Some(Workflow::Traditional)
    } else {
        None
    };
    ComparisonRow {
        category,
        chemistry_free: fl,
        traditional: tr,
        difference: fl - tr,
        percent_diff,
        preferred,
        significant: percent_diff.abs() > SIGNIFICANT_DIFF_PERCENT,
    }
}

/// 비용 항목마다 한 행씩 비교 표를 만든다.
pub fn build_table(result: &ComparisonResult) -> Vec<ComparisonRow> {
    CostCategory::ALL
        .iter()
        .map(|c| build_row(*c, result))
        .collect()
}

/// CLI 출력용 텍스트 표. `*`는 낮은 쪽, `!`는 10% 초과 차이.
pub fn render_text_table(rows: &[ComparisonRow]) -> String {
    let headers = [
        "Item",
        Workflow::ChemistryFree.label(),
        Workflow::Traditional.label(),
        "Difference",
    ];
    let body: Vec<[String; 4]> = rows
        .iter()
        .map(|row| {
            let [fl, tr, diff] = row.cells();
            let mark = |wf: Workflow, s: String| {
                if row.preferred == Some(wf) {
                    format!("{s} *")
                } else {
                    s
                }
            };
            [
                row.label().to_string(),
                mark(Workflow::ChemistryFree, fl),
                mark(Workflow::Traditional, tr),
                if row.significant { format!("{diff} !") } else { diff },
            ]
        })
        .collect();

    let mut widths = headers.map(|h| h.chars().count());
    for line in &body {
        for (w, cell) in widths.iter_mut().zip(line.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, headers, &widths);
    let rule_len = widths.iter().sum::<usize>() + 3 * (widths.len() - 1);
    out.push_str(&"-".repeat(rule_len));
    out.push('\n');
    for line in &body {
        push_line(&mut out, [&line[0], &line[1], &line[2], &line[3]], &widths);
    }
    out.push_str("* lower cost   ! difference above 10%\n");
    out
}

fn push_line(out: &mut String, cells: [&str; 4], widths: &[usize; 4]) {
    out.push_str(&format!("{:<width$}", cells[0], width = widths[0]));
    for (cell, w) in cells[1..].iter().zip(widths[1..].iter()) {
        out.push_str(&format!(" | {cell:>width$}", width = *w));
    }
    out.push('\n');
}
