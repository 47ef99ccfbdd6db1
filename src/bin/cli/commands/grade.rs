use anyhow::Result;

use studyhub_lib::grades::{score_to_grade, Grade};

use crate::OutputFormat;

pub fn run(score: f64, strict: bool, format: &OutputFormat) -> Result<()> {
    let grade = if strict {
        Grade::try_from_score(score)?
    } else {
        score_to_grade(score)
    };

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "score": score,
                "grade": grade.label(),
                "passing": grade.is_passing(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            let verdict = if grade.is_passing() { "passed" } else { "failed" };
            println!("{} ({})", grade, verdict);
        }
    }

    Ok(())
}
