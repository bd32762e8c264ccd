use std::io::{self, Write};

use crate::app::AppError;
use crate::fields::{FieldSection, InputField};
use crate::form::{check_field, FieldValidity, FormState, ValidationError};
use crate::input::parse_namespaced_id;
use crate::persistence::SavedInputs;
use crate::presentation::format_amount;
use crate::workflow::Workflow;

/// 명령줄 `--set fl-work-days=22` 한 건.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldAssignment {
    pub workflow: Workflow,
    pub field: InputField,
    pub text: String,
}

/// `ID=VALUE` 문자열을 해석한다. clap value parser로 쓴다.
pub fn parse_field_assignment(s: &str) -> Result<FieldAssignment, String> {
    let (id, text) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ID=VALUE, got `{s}`"))?;
    let (workflow, field) = parse_namespaced_id(id.trim())
        .ok_or_else(|| format!("unknown field id `{}` (use fl-/tr- plus a field name)", id.trim()))?;
    Ok(FieldAssignment {
        workflow,
        field,
        text: text.trim().to_string(),
    })
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    if io::stdin().read_line(&mut buf)? == 0 {
        return Err(AppError::InputClosed);
    }
    Ok(buf)
}

/// 필드마다 값을 묻는다. 빈 입력은 현재 값을 유지하며 잘못된 값은 다시 묻는다.
pub fn prompt_form(form: &mut FormState) -> Result<(), AppError> {
    for wf in Workflow::ALL {
        println!("\n=== {} ===", wf.label());
        for section in FieldSection::ALL {
            println!("-- {} --", section.label());
            for field in InputField::in_section(section) {
                prompt_field(form, wf, field)?;
            }
        }
    }
    Ok(())
}

fn prompt_field(form: &mut FormState, wf: Workflow, field: InputField) -> Result<(), AppError> {
    loop {
        let current = form.text(wf, field).to_string();
        let prompt = if current.is_empty() {
            format!("{} [{}]: ", field.label(), field.unit())
        } else {
            format!("{} [{}] ({current}): ", field.label(), field.unit())
        };
        let line = read_line(&prompt)?;
        let entered = line.trim();
        let candidate = if entered.is_empty() {
            current
        } else {
            entered.to_string()
        };
        match check_field(&candidate) {
            FieldValidity::Valid => {
                form.set_text(wf, field, candidate);
                return Ok(());
            }
            invalid => println!("  Invalid value: {}.", invalid.describe()),
        }
    }
}

/// 제출 차단 안내를 출력한다.
pub fn print_validation_error(err: &ValidationError) {
    eprintln!("Please fill in all required fields with valid values.");
    for (id, validity) in &err.invalid {
        eprintln!("  {id}: {}", validity.describe());
    }
}

/// 저장된 입력을 필드별로 출력한다.
pub fn print_saved(saved: &SavedInputs) {
    let width = InputField::all()
        .map(|f| f.label().chars().count())
        .max()
        .unwrap_or(0);
    println!(
        "{:<width$} | {:>14} | {:>14}",
        "Field",
        Workflow::ChemistryFree.key(),
        Workflow::Traditional.key()
    );
    let cell = |wf: Workflow, field: InputField| {
        saved
            .get(wf)
            .map(|r| format_amount(r.get(field)))
            .unwrap_or_else(|| "-".to_string())
    };
    for field in InputField::all() {
        println!(
            "{:<width$} | {:>14} | {:>14}",
            field.label(),
            cell(Workflow::ChemistryFree, field),
            cell(Workflow::Traditional, field)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignment_parsing() {
        let a = parse_field_assignment("tr-water-price = 2.5").unwrap();
        assert_eq!(a.workflow, Workflow::Traditional);
        assert_eq!(a.field, InputField::WaterPrice);
        assert_eq!(a.text, "2.5");
        assert!(parse_field_assignment("tr-water-price").is_err());
        assert!(parse_field_assignment("water-price=1").is_err());
    }
}
