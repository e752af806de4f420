//! Forensic prompts.
//!
//! The prompts steer the model toward neutral, observational commentary
//! phrased in the indicator vocabulary that the normalizer scans for.
//! The model never issues a verdict; the fusion engine does.

/// How much extracted text a certificate prompt carries.
const PROMPT_TEXT_BUDGET: usize = 4_000;

/// Prompt for image/document forensic commentary.
pub fn image_forensic_prompt() -> &'static str {
    "Analyze the provided image strictly from a forensic and observational perspective.\n\
     Focus ONLY on visually observable characteristics:\n\
     1. Texture and detail: over-smoothing, plastic-like surfaces, inconsistent sharpness, \
        loss of fine-grain sensor noise.\n\
     2. Structure and geometry: asymmetric shapes, warped edges, unnatural transitions, \
        inconsistent proportions.\n\
     3. Lighting and reflections: mismatched light direction, shadows that do not align, \
        inconsistent reflections, implausible details.\n\
     4. Patterns and artifacts: repeating micro-patterns, grid-like artifacts, checkerboard \
        artifacts, abrupt texture boundaries.\n\
     IMPORTANT RULES:\n\
     - Do NOT label the image as real, fake, or AI-generated.\n\
     - Do NOT use absolute or definitive language.\n\
     - Do NOT assign numeric scores or probabilities.\n\
     - Keep language neutral, descriptive, and evidence-based.\n\
     Return: a bullet list of observations, a list of potential synthetic indicators, \
     noted uncertainty and limitations, and a short neutral explanation summary."
}

/// Prompt for certificate forensic commentary, grounded in the
/// extracted page or document text.
pub fn certificate_forensic_prompt(provider: &str, extracted_text: &str) -> String {
    let excerpt: String = extracted_text.chars().take(PROMPT_TEXT_BUDGET).collect();
    format!(
        "You are reviewing text extracted from a {provider} course certificate page.\n\
         Comment strictly observationally on whether the content shows:\n\
         - typical layout and expected phrases for {provider} certificates\n\
         - format consistency and logical consistency of names, dates, and courses\n\
         - certificate id present, branding present\n\
         and on any concerns such as: spelling anomaly, mismatched styles, manual \
         editing traces, inconsistent font usage, or layout incoherence.\n\
         Use exactly those phrases when they apply. Do NOT declare the certificate \
         valid or invalid and do NOT assign scores.\n\n\
         Extracted content:\n{excerpt}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_prompt_forbids_verdicts() {
        let prompt = image_forensic_prompt();
        assert!(prompt.contains("Do NOT label"));
        assert!(prompt.contains("observational"));
    }

    #[test]
    fn certificate_prompt_embeds_provider_and_text() {
        let prompt = certificate_forensic_prompt("Udemy", "Certificate of Completion");
        assert!(prompt.contains("Udemy"));
        assert!(prompt.contains("Certificate of Completion"));
    }

    #[test]
    fn certificate_prompt_truncates_oversized_text() {
        let huge = "x".repeat(100_000);
        let prompt = certificate_forensic_prompt("Coursera", &huge);
        assert!(prompt.len() < 10_000);
    }
}
