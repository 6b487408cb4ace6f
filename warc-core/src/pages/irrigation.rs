use crate::{
    form::{FieldKind, FieldSpec, FormError, FormSchema, ValidForm},
    models::{CropType, GrowthStage, IrrigationRecommendation, IrrigationRequest, SoilType},
    view::{Chart, ChartKind, ChartPoint, Metric, ResultView, fixed2},
};

use super::{Page, PageKind};

const FIELDS: &[FieldSpec] = &[
    FieldSpec::number("date", "Date", "Day the recommendation is for.").with_kind(FieldKind::Date),
    FieldSpec::number("temperature", "Temperature (°C)", "Air temperature in degrees Celsius."),
    FieldSpec::number("humidity", "Humidity (%)", "Relative humidity as a percentage."),
    FieldSpec::number("soil_moisture", "Soil Moisture (%)", "Volumetric soil moisture as a percentage."),
    FieldSpec::number(
        "rainfall_last_7days",
        "Rainfall (last 7 days, mm)",
        "Total rainfall over the previous seven days in millimeters.",
    ),
    FieldSpec::number("crop_type", "Crop Type", "Crop grown on the field.")
        .with_kind(FieldKind::Choice(CropType::NAMES))
        .with_default("wheat"),
    FieldSpec::number("growth_stage", "Growth Stage", "Current growth stage of the crop.")
        .with_kind(FieldKind::Choice(GrowthStage::NAMES))
        .with_default("vegetative"),
    FieldSpec::number("soil_type", "Soil Type", "Dominant soil texture of the field.")
        .with_kind(FieldKind::Choice(SoilType::NAMES))
        .with_default("loam"),
    FieldSpec::number("area_hectares", "Area (hectares)", "Irrigated area in hectares."),
    FieldSpec::number("sunlight_hours", "Sunlight Hours", "Hours of direct sunlight per day."),
    FieldSpec::number("wind_speed", "Wind Speed (km/h)", "Average wind speed in kilometers per hour."),
];

/// Factors applied to the recommendation for the trend chart's
/// previous and projected points.
const PREVIOUS_FACTOR: f64 = 0.9;
const PROJECTED_FACTOR: f64 = 1.1;

pub struct Irrigation;

impl Page for Irrigation {
    type Request = IrrigationRequest;
    type Response = IrrigationRecommendation;

    const KIND: PageKind = PageKind::Irrigation;
    const SCHEMA: FormSchema = FormSchema::new(FIELDS);
    const ERROR_MESSAGE: &'static str = "Error fetching recommendation. Please try again.";

    fn build_request(form: &ValidForm) -> Result<Self::Request, FormError> {
        Ok(IrrigationRequest {
            date: form.date("date")?.format("%Y-%m-%d").to_string(),
            temperature: form.text("temperature")?,
            humidity: form.text("humidity")?,
            soil_moisture: form.text("soil_moisture")?,
            rainfall_last_7days: form.text("rainfall_last_7days")?,
            crop_type: form.choice("crop_type")?,
            growth_stage: form.choice("growth_stage")?,
            soil_type: form.choice("soil_type")?,
            area_hectares: form.text("area_hectares")?,
            sunlight_hours: form.text("sunlight_hours")?,
            wind_speed: form.text("wind_speed")?,
        })
    }

    fn view(response: &Self::Response) -> ResultView {
        let amount = response.irrigation_amount_liters;
        let mut view = ResultView::new("Recommendation");
        view.metrics.push(Metric::new(
            "Recommended irrigation amount",
            format!("{} liters", fixed2(amount)),
        ));

        let point = |label: &str, value: f64| ChartPoint {
            label: label.to_string(),
            value,
        };
        view.chart = Some(Chart {
            title: "Irrigation Trend".to_string(),
            kind: ChartKind::Area,
            x_label: None,
            points: vec![
                point("Previous", amount * PREVIOUS_FACTOR),
                point("Current", amount),
                point("Projected", amount * PROJECTED_FACTOR),
            ],
            caption: None,
        });

        view
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::form::FormState;

    fn filled_form() -> FormState {
        let mut form = FormState::new(Irrigation::SCHEMA);
        for (name, value) in [
            ("date", "2024-07-15"),
            ("temperature", "31.5"),
            ("humidity", "40"),
            ("soil_moisture", "18"),
            ("rainfall_last_7days", "2.5"),
            ("area_hectares", "3"),
            ("sunlight_hours", "10"),
            ("wind_speed", "12"),
        ] {
            form.update_field(name, value).unwrap();
        }
        form
    }

    #[test]
    fn choices_start_at_their_defaults() {
        let form = FormState::new(Irrigation::SCHEMA);
        assert_eq!(form.value("crop_type"), Some("wheat"));
        assert_eq!(form.value("growth_stage"), Some("vegetative"));
        assert_eq!(form.value("soil_type"), Some("loam"));
    }

    #[test]
    fn request_uses_text_measurements_and_lowercase_options() {
        let mut form = filled_form();
        form.update_field("crop_type", "Rice").unwrap();

        let request = Irrigation::build_request(&form.validate().unwrap()).unwrap();

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "date": "2024-07-15",
                "temperature": "31.5",
                "humidity": "40",
                "soil_moisture": "18",
                "rainfall_last_7days": "2.5",
                "crop_type": "rice",
                "growth_stage": "vegetative",
                "soil_type": "loam",
                "area_hectares": "3",
                "sunlight_hours": "10",
                "wind_speed": "12",
            })
        );
    }

    #[test]
    fn missing_date_blocks_the_request() {
        let mut form = filled_form();
        form.update_field("date", "").unwrap();

        assert!(form.validate().is_err());
    }

    #[test]
    fn view_shows_amount_and_trend() {
        let view = Irrigation::view(&IrrigationRecommendation {
            irrigation_amount_liters: 1250.0,
        });

        assert_eq!(
            view.metric("Recommended irrigation amount").unwrap().value,
            "1250.00 liters"
        );

        let chart = view.chart.unwrap();
        assert_eq!(chart.kind, ChartKind::Area);
        let labels: Vec<&str> = chart.points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["Previous", "Current", "Projected"]);
        assert_eq!(chart.points[1].value, 1250.0);
        assert!((chart.points[0].value - 1125.0).abs() < 1e-9);
        assert!((chart.points[2].value - 1375.0).abs() < 1e-9);
    }
}
