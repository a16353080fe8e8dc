//! HTML rendering for the prediction form

use feature_engine::{CategoricalField, CustomerForm, Encoders};
use html_escape::{encode_double_quoted_attribute, encode_text};
use inference_engine::Prediction;
use std::fmt::Write;

/// What to show below the form
pub enum Outcome<'a> {
    Prediction(&'a Prediction),
    Error(&'a str),
}

const HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Customer Churn Prediction</title>
<style>
body { font-family: sans-serif; max-width: 36rem; margin: 2rem auto; }
label { display: block; margin-top: 0.6rem; }
input, select { width: 100%; padding: 0.3rem; }
button { margin-top: 1rem; padding: 0.5rem 1.5rem; }
.result { margin-top: 1.5rem; font-size: 1.2rem; }
.error { margin-top: 1.5rem; color: #b00020; }
</style>
</head>
<body>
<h1>Customer Churn Prediction</h1>
<form method="post" action="/">
"#;

const TAIL: &str = "</body>\n</html>\n";

/// Render the form, echoing submitted values, with an optional outcome
pub fn page(encoders: &Encoders, form: &CustomerForm, outcome: Option<Outcome<'_>>) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str(HEAD);

    number_input(&mut html, "age", "Age", "1", form.age.as_deref());
    select(&mut html, encoders, form, CategoricalField::Gender);
    select(&mut html, encoders, form, CategoricalField::ContractType);
    number_input(
        &mut html,
        "monthly_charges",
        "Monthly Charges",
        "0.01",
        form.monthly_charges.as_deref(),
    );
    number_input(
        &mut html,
        "total_charges",
        "Total Charges",
        "0.01",
        form.total_charges.as_deref(),
    );
    select(&mut html, encoders, form, CategoricalField::TechSupport);
    select(&mut html, encoders, form, CategoricalField::InternetService);
    number_input(&mut html, "tenure", "Tenure (months)", "1", form.tenure.as_deref());
    select(&mut html, encoders, form, CategoricalField::PaperlessBilling);
    select(&mut html, encoders, form, CategoricalField::PaymentMethod);

    html.push_str("<button type=\"submit\">Predict</button>\n</form>\n");

    match outcome {
        Some(Outcome::Prediction(prediction)) => {
            let _ = write!(
                html,
                "<div class=\"result\">\n<p>Churn: <strong>{}</strong></p>\n<p>Probability: {:.2}</p>\n</div>\n",
                prediction.label, prediction.probability_rounded
            );
        }
        Some(Outcome::Error(message)) => {
            let _ = writeln!(html, "<p class=\"error\">{}</p>", encode_text(message));
        }
        None => {}
    }

    html.push_str(TAIL);
    html
}

fn number_input(html: &mut String, name: &str, label: &str, step: &str, value: Option<&str>) {
    let _ = writeln!(
        html,
        "<label for=\"{name}\">{label}</label>\n<input type=\"number\" min=\"0\" step=\"{step}\" id=\"{name}\" name=\"{name}\" value=\"{}\" required>",
        encode_double_quoted_attribute(value.unwrap_or_default()),
    );
}

fn select(html: &mut String, encoders: &Encoders, form: &CustomerForm, field: CategoricalField) {
    let name = field.as_str();
    let submitted = form.category(field);

    let _ = writeln!(
        html,
        "<label for=\"{name}\">{}</label>\n<select id=\"{name}\" name=\"{name}\" required>",
        field.label()
    );
    for class in encoders.get(field).classes() {
        let selected = if submitted == Some(class.as_str()) {
            " selected"
        } else {
            ""
        };
        let _ = writeln!(
            html,
            "<option value=\"{}\"{selected}>{}</option>",
            encode_double_quoted_attribute(class),
            encode_text(class)
        );
    }
    html.push_str("</select>\n");
}
