// Code quality metric names derived from a component name

/// Characters that are not valid in a metric identifier
const UNSAFE_CHARS: [char; 6] = ['-', '$', '.', '+', '#', ')'];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeQualityMetricName {
    pub coverage: String,
    pub smells: String,
    pub vulnerabilities: String,
    pub security_hotspots: String,
    pub dup_lines_density: String,
}

impl CodeQualityMetricName {
    pub fn from_component(component_name: &str) -> Self {
        let base = sanitize(component_name);
        Self {
            coverage: format!("{}_coverage", base),
            smells: format!("{}_code_smells", base),
            vulnerabilities: format!("{}_vulnerabilities", base),
            security_hotspots: format!("{}_security_hotspots", base),
            dup_lines_density: format!("{}_duplicated_lines_density", base),
        }
    }

    pub fn all(&self) -> [&str; 5] {
        [
            &self.coverage,
            &self.smells,
            &self.vulnerabilities,
            &self.security_hotspots,
            &self.dup_lines_density,
        ]
    }
}

/// Replace every unsafe character with an underscore
pub fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if UNSAFE_CHARS.contains(&c) { '_' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_health_component() {
        let names = CodeQualityMetricName::from_component("svc-payments.v2");

        assert_eq!(names.coverage, "svc_payments_v2_coverage");
        assert_eq!(names.smells, "svc_payments_v2_code_smells");
        assert_eq!(names.vulnerabilities, "svc_payments_v2_vulnerabilities");
        assert_eq!(names.security_hotspots, "svc_payments_v2_security_hotspots");
        assert_eq!(
            names.dup_lines_density,
            "svc_payments_v2_duplicated_lines_density"
        );
    }

    #[test]
    fn test_no_unsafe_chars_survive() {
        let names = CodeQualityMetricName::from_component("a-b$c.d+e#f)g--$$..++##))");

        for name in names.all() {
            assert!(!name.contains(UNSAFE_CHARS), "{} kept an unsafe char", name);
        }
        assert_eq!(names.coverage, "a_b_c_d_e_f_g_____________coverage");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        for raw in ["svc-payments.v2", "c++(lib)#1", "$plain", "already_clean"] {
            let once = sanitize(raw);
            assert_eq!(sanitize(&once), once);
        }
    }

    #[test]
    fn test_other_chars_untouched() {
        assert_eq!(sanitize("svc(payments)/v2"), "svc(payments_/v2");
    }
}
