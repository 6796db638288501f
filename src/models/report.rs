use serde::Serialize;

/// Alert level attached to a diagnosis, rendered as a display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    /// Benign finding.
    #[serde(rename = "green")]
    Normal,
    /// Worth clinical review.
    #[serde(rename = "orange")]
    Caution,
    /// Urgent finding.
    #[serde(rename = "red")]
    Critical,
    /// The signal could not be analyzed.
    #[serde(rename = "grey")]
    Unreadable,
}

impl Severity {
    /// Display color for the companion app.
    pub fn as_color(&self) -> &'static str {
        match self {
            Severity::Normal => "green",
            Severity::Caution => "orange",
            Severity::Critical => "red",
            Severity::Unreadable => "grey",
        }
    }
}

/// Numeric evidence backing a diagnosis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RhythmMetrics {
    /// Heart rate in beats per minute; 0.0 when undeterminable.
    pub bpm: f32,
    /// Coefficient of variation of the RR intervals (stddev / mean).
    pub rr_cv: f32,
    /// Whether a deflection preceded most beats; None when not probed.
    pub p_wave_present: Option<bool>,
    /// Leads flagged for sustained post-beat elevation (12-lead mode).
    pub st_elevated_leads: Vec<String>,
}

impl RhythmMetrics {
    /// Metrics for a signal with too few beats to measure.
    pub fn unreadable() -> Self {
        Self {
            bpm: 0.0,
            rr_cv: 0.0,
            p_wave_present: None,
            st_elevated_leads: Vec::new(),
        }
    }
}

/// Rhythm classification outcome. A pure function of its inputs: identical
/// beat lists and settings always produce the identical diagnosis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnosis {
    /// Human-readable classification label.
    pub label: String,
    /// Alert level.
    pub severity: Severity,
    /// Supporting measurements.
    pub metrics: RhythmMetrics,
}

/// The structured report returned to the caller.
///
/// Field names follow the wire contract consumed by the companion mobile
/// application, hence the Spanish keys.
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticReport {
    /// Integer heart rate in bpm; 0 when undeterminable.
    pub frecuencia_cardiaca: u32,
    /// Classification label.
    pub diagnostico_texto: String,
    /// Severity color: green, orange, red or grey.
    pub alerta_color: Severity,
    /// Display-ready waveform, decimated to the configured point budget.
    pub senal_grafica: Vec<f32>,
    /// Optional supporting detail (regularity ratio, unreadable leads, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detalles: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_colors() {
        assert_eq!(Severity::Normal.as_color(), "green");
        assert_eq!(Severity::Caution.as_color(), "orange");
        assert_eq!(Severity::Critical.as_color(), "red");
        assert_eq!(Severity::Unreadable.as_color(), "grey");
    }

    #[test]
    fn test_report_serialization() {
        let report = DiagnosticReport {
            frecuencia_cardiaca: 60,
            diagnostico_texto: "normal sinus rhythm".into(),
            alerta_color: Severity::Normal,
            senal_grafica: vec![0.0, 1.0],
            detalles: None,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["frecuencia_cardiaca"], 60);
        assert_eq!(json["alerta_color"], "green");
        assert!(json.get("detalles").is_none());
    }
}
