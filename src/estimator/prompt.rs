//! Prompt templates, one per variant.

use crate::types::Variant;

/// Build the instruction prompt for a meal description.
///
/// The description is embedded verbatim. Output is deterministic for a
/// given `(description, variant)` pair.
pub fn build_prompt(description: &str, variant: Variant) -> String {
    match variant {
        Variant::Protein => format!(
            "\nYou are a nutrition expert.\n\n\
             Estimate TOTAL CALORIES and PROTEIN for this meal:\n\
             \"{description}\"\n\n\
             Rules:\n\
             - Protein must be in grams (number only)\n\
             - Calories must be numbers\n\
             - Be realistic\n\
             - Sum breakdown to totals\n\n\
             Return ONLY valid JSON. No text before or after the JSON object.\n\n\
             JSON format:\n\
             {{\n  \
               \"totalCalories\": number,\n  \
               \"totalProtein\": number,\n  \
               \"confidence\": \"high\" | \"medium\" | \"low\",\n  \
               \"breakdown\": [\n    \
                 {{ \"item\": string, \"calories\": number, \"protein\": number }}\n  \
               ]\n\
             }}\n"
        ),
        Variant::Calories => format!(
            "\nYou are a nutrition expert.\n\n\
             Estimate the TOTAL CALORIES for this meal:\n\
             \"{description}\"\n\n\
             Rules:\n\
             - Calories must be numbers\n\
             - Be realistic\n\
             - Sum breakdown to the total\n\n\
             Return ONLY valid JSON. No text before or after the JSON object.\n\n\
             JSON format:\n\
             {{\n  \
               \"totalCalories\": number,\n  \
               \"confidence\": \"high\" | \"medium\" | \"low\",\n  \
               \"breakdown\": [\n    \
                 {{ \"item\": string, \"calories\": number }}\n  \
               ]\n\
             }}\n"
        ),
    }
}
