use crate::{
    form::{FieldSpec, FormError, FormSchema, ValidForm},
    models::{RainwaterPrediction, RainwaterRequest, WeatherDay},
    view::{Metric, ResultView, fixed2},
};

use super::{Page, PageKind};

const FIELDS: &[FieldSpec] = &[
    FieldSpec::unlabeled_number("rainfall", "Rainfall for the day in millimeters."),
    FieldSpec::unlabeled_number("temperature", "Air temperature in degrees Celsius."),
    FieldSpec::unlabeled_number("humidity", "Relative humidity as a percentage."),
    FieldSpec::unlabeled_number("windSpeed", "Wind speed in meters per second."),
    FieldSpec::unlabeled_number("roofArea", "Catchment roof area in square meters."),
    FieldSpec::unlabeled_number("currentStorage", "Water already in storage, in cubic meters."),
    FieldSpec::unlabeled_number("maxCapacity", "Total storage capacity in cubic meters."),
];

pub struct RainwaterHarvesting;

impl Page for RainwaterHarvesting {
    type Request = RainwaterRequest;
    type Response = RainwaterPrediction;

    const KIND: PageKind = PageKind::Rainwater;
    const SCHEMA: FormSchema = FormSchema::new(FIELDS);
    const ERROR_MESSAGE: &'static str = "An error occurred. Please try again.";

    /// The model wants a month of history; the single observed day is
    /// repeated to fill it.
    fn build_request(form: &ValidForm) -> Result<Self::Request, FormError> {
        let day = WeatherDay {
            rainfall: form.number("rainfall")?,
            temperature: form.number("temperature")?,
            humidity: form.number("humidity")?,
            wind_speed: form.number("windSpeed")?,
            roof_area: form.number("roofArea")?,
        };

        Ok(RainwaterRequest {
            weather_data: day.repeat_window(),
            current_storage: form.number("currentStorage")?,
            max_capacity: form.number("maxCapacity")?,
        })
    }

    fn view(response: &Self::Response) -> ResultView {
        let mut view = ResultView::new("Prediction Results");
        view.metrics.push(Metric::new(
            "Predicted Harvestable Water",
            format!("{} m³", fixed2(response.predicted_harvestable_water)),
        ));
        view.metrics
            .push(Metric::new("Suggestion", response.suggestion.clone()));
        view
    }
}
