use crate::{
    form::{FieldSpec, FormError, FormSchema, ValidForm},
    models::{LeakDetectionRequest, LeakPrediction},
    view::{Chart, ChartKind, ChartPoint, Emphasis, Metric, ResultView, fixed2, percent},
};

use super::{Page, PageKind};

/// Length of the monitored pipeline section in meters.
pub const PIPELINE_LENGTH_M: f64 = 1000.0;

const FIELDS: &[FieldSpec] = &[
    FieldSpec::number(
        "pressure",
        "Pressure (PSI)",
        "The current pressure in the pipeline, measured in pounds per square inch (PSI). Normal range: 50-100 PSI.",
    ),
    FieldSpec::number(
        "flow_rate",
        "Flow Rate (GPM)",
        "The rate of water flow through the pipeline, measured in gallons per minute (GPM). Normal range: 100-500 GPM.",
    ),
    FieldSpec::number(
        "vibration",
        "Vibration (mm/s)",
        "The amount of vibration detected in the pipeline, measured in millimeters per second (mm/s). Normal range: 0-10 mm/s.",
    ),
    FieldSpec::number(
        "temperature",
        "Temperature (°C)",
        "The temperature of the water or surrounding environment, measured in degrees Celsius (°C). Normal range: 10-30°C.",
    ),
    FieldSpec::number(
        "acoustic_signal",
        "Acoustic Signal (dB)",
        "The strength of acoustic signals detected in the pipeline, measured in decibels (dB). Normal range: 20-100 dB.",
    ),
    FieldSpec::number(
        "pipe_age",
        "Pipe Age (years)",
        "The age of the pipeline section being monitored, measured in years. Range: 0-50 years.",
    ),
    FieldSpec::number(
        "distance",
        "Distance (m)",
        "The distance along the pipeline where the measurements are taken, measured in meters (m). Range: 0-1000 m.",
    ),
];

pub struct LeakDetection;

impl Page for LeakDetection {
    type Request = LeakDetectionRequest;
    type Response = LeakPrediction;

    const KIND: PageKind = PageKind::LeakDetection;
    const SCHEMA: FormSchema = FormSchema::new(FIELDS);
    const ERROR_MESSAGE: &'static str = "Error fetching prediction. Please try again.";

    fn build_request(form: &ValidForm) -> Result<Self::Request, FormError> {
        Ok(LeakDetectionRequest {
            pressure: form.text("pressure")?,
            flow_rate: form.text("flow_rate")?,
            vibration: form.text("vibration")?,
            temperature: form.text("temperature")?,
            acoustic_signal: form.text("acoustic_signal")?,
            pipe_age: form.text("pipe_age")?,
            distance: form.text("distance")?,
        })
    }

    fn view(response: &Self::Response) -> ResultView {
        let mut view = ResultView::new("Prediction Results");

        let (answer, emphasis) = if response.leak_detected {
            ("Yes", Emphasis::Alert)
        } else {
            ("No", Emphasis::Positive)
        };
        view.metrics
            .push(Metric::new("Leak Detected", answer).with_emphasis(emphasis));
        view.metrics.push(Metric::new(
            "Leak Probability",
            percent(response.leak_probability),
        ));

        if let (true, Some(location)) = (response.leak_detected, response.leak_location) {
            view.metrics.push(Metric::new(
                "Leak Location",
                format!("{} meters", fixed2(location)),
            ));
            view.chart = Some(pipeline_chart(location));
        }

        view
    }
}

/// Marks the leak position on a flat pipeline profile.
fn pipeline_chart(location: f64) -> Chart {
    let point = |distance: f64, value: f64| ChartPoint {
        label: format!("{} m", fixed2(distance)),
        value,
    };

    Chart {
        title: "Pipeline Visualization".to_string(),
        kind: ChartKind::Line,
        x_label: Some("Distance along pipeline (m)".to_string()),
        points: vec![
            point(0.0, 0.0),
            point(location, 1.0),
            point(PIPELINE_LENGTH_M, 0.0),
        ],
        caption: Some(format!(
            "Leak detected at {} meters along the pipeline",
            fixed2(location)
        )),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::form::{FieldError, FormState};

    fn filled_form() -> FormState {
        let mut form = FormState::new(LeakDetection::SCHEMA);
        for (name, value) in [
            ("pressure", "80"),
            ("flow_rate", "300"),
            ("vibration", "5"),
            ("temperature", "20"),
            ("acoustic_signal", "60"),
            ("pipe_age", "10"),
            ("distance", "500"),
        ] {
            form.update_field(name, value).unwrap();
        }
        form
    }

    #[test]
    fn request_carries_readings_as_numeric_text() {
        let request = LeakDetection::build_request(&filled_form().validate().unwrap()).unwrap();

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "pressure": "80",
                "flow_rate": "300",
                "vibration": "5",
                "temperature": "20",
                "acoustic_signal": "60",
                "pipe_age": "10",
                "distance": "500",
            })
        );
    }

    #[test]
    fn detected_leak_shows_location_and_pipeline() {
        let view = LeakDetection::view(&LeakPrediction {
            leak_detected: true,
            leak_probability: 0.82,
            leak_location: Some(342.5),
        });

        assert_eq!(view.metric("Leak Detected").unwrap().value, "Yes");
        assert_eq!(view.metric("Leak Detected").unwrap().emphasis, Emphasis::Alert);
        assert_eq!(view.metric("Leak Probability").unwrap().value, "82.00%");
        assert_eq!(view.metric("Leak Location").unwrap().value, "342.50 meters");

        let chart = view.chart.expect("pipeline chart when a leak is found");
        let values: Vec<f64> = chart.points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![0.0, 1.0, 0.0]);
        assert_eq!(chart.points[1].label, "342.50 m");
        assert_eq!(
            chart.caption.as_deref(),
            Some("Leak detected at 342.50 meters along the pipeline")
        );
    }

    #[test]
    fn no_leak_hides_location_and_chart() {
        let view = LeakDetection::view(&LeakPrediction {
            leak_detected: false,
            leak_probability: 0.035,
            leak_location: None,
        });

        assert_eq!(view.metric("Leak Detected").unwrap().value, "No");
        assert_eq!(view.metric("Leak Probability").unwrap().value, "3.50%");
        assert!(view.metric("Leak Location").is_none());
        assert!(view.chart.is_none());
    }

    #[test]
    fn no_leak_answer_may_omit_or_null_the_location() {
        for body in [
            serde_json::json!({ "leak_detected": false, "leak_probability": 0.1, "leak_location": null }),
            serde_json::json!({ "leak_detected": false, "leak_probability": 0.1 }),
        ] {
            let prediction: LeakPrediction = serde_json::from_value(body).unwrap();

            assert_eq!(prediction.leak_location, None);
            assert_eq!(LeakDetection::view(&prediction).metric("Leak Detected").unwrap().value, "No");
        }
    }

    #[test]
    fn misplaced_commas_fail_validation_before_a_request_is_built() {
        let mut form = filled_form();
        form.update_field("vibration", "1,5").unwrap();
        form.update_field("pressure", "8,0,0").unwrap();

        match form.validate() {
            Err(FormError::Invalid(errors)) => {
                let fields: Vec<_> = errors.iter().map(FieldError::field).collect();
                assert_eq!(fields, vec!["pressure", "vibration"]);
            }
            other => panic!("expected Invalid, got {other:?}"),
        }
    }
}
