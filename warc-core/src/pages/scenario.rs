use crate::{
    form::{FieldKind, FieldSpec, FormError, FormSchema, ValidForm},
    models::{Scenario, ScenarioColumn, ScenarioRequest},
    view::{Column, ResultView, Table},
};

use super::{Page, PageKind};

const FIELDS: &[FieldSpec] = &[FieldSpec::number(
    "num_scenarios",
    "Number of Scenarios",
    "How many scenarios the generator should produce.",
)
.with_kind(FieldKind::Integer)
.with_default("10")];

pub struct ScenarioGenerator;

impl Page for ScenarioGenerator {
    type Request = ScenarioRequest;
    type Response = Vec<Scenario>;

    const KIND: PageKind = PageKind::Scenarios;
    const SCHEMA: FormSchema = FormSchema::new(FIELDS);
    const ERROR_MESSAGE: &'static str = "Error generating scenarios. Please try again.";

    fn build_request(form: &ValidForm) -> Result<Self::Request, FormError> {
        Ok(ScenarioRequest {
            num_scenarios: form.integer("num_scenarios")?,
        })
    }

    fn view(response: &Self::Response) -> ResultView {
        let mut view = ResultView::new("Generated Scenarios");
        view.table = Some(scenario_table(response));
        view
    }
}

pub fn column_header(column: ScenarioColumn) -> String {
    column.key().replace('_', " ")
}

fn scenario_table(scenarios: &[Scenario]) -> Table {
    let columns = ScenarioColumn::ALL
        .iter()
        .map(|c| Column {
            key: c.key(),
            header: column_header(*c),
            description: c.description(),
        })
        .collect();

    let rows = scenarios
        .iter()
        .map(|s| ScenarioColumn::ALL.iter().map(|c| c.cell(s)).collect())
        .collect();

    Table {
        title: "Generated Scenarios".to_string(),
        columns,
        rows,
    }
}
