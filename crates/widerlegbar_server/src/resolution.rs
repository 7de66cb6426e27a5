use actix_web::{error, http::header::ContentType, web, HttpResponse, Responder, Result};
use widerlegbar::{
    parse::{parse_clause_set, ParseErr},
    session, Clause, Params, Prover,
};

use crate::{ParseForm, ProveForm};

pub(crate) async fn prop() -> impl Responder {
    HttpResponse::Ok().body(
        "Calculus prop-resolution loaded.
Interact via the /parse and /prove endpoints"
            .to_string(),
    )
}

pub(crate) async fn prop_parse(form: web::Form<ParseForm>) -> Result<HttpResponse> {
    session(|| {
        let ParseForm { formula } = form.0;

        let clauses: Vec<Clause> = parse_clause_set(&formula)
            .map_err(error::ErrorBadRequest)?
            .into_iter()
            .enumerate()
            .map(|(id, lits)| Clause::input(id, lits))
            .collect();

        Ok(HttpResponse::Ok().json(clauses))
    })
}

enum ProveErr {
    Parse(ParseErr),
    /// Rendered inside the session, the message needs its symbols.
    Resolution(String),
    Json(serde_json::Error),
}

/// Parses and refutes `formula`, returning the report as JSON. Symbols only
/// live as long as the session, so serialization happens in here too.
fn prove(formula: &str, params: Params) -> Result<String, ProveErr> {
    session(|| {
        let input = parse_clause_set(formula).map_err(ProveErr::Parse)?;
        let report =
            Prover::prove(input, params).map_err(|e| ProveErr::Resolution(e.to_string()))?;
        log::debug!(
            "proved {} clauses: refuted {} after {} iterations",
            report.summary.clauses,
            report.outcome.is_refuted(),
            report.summary.iterations
        );
        serde_json::to_string(&report).map_err(ProveErr::Json)
    })
}

pub(crate) async fn prop_prove(form: web::Form<ProveForm>) -> Result<HttpResponse> {
    let ProveForm { formula, params } = form.0;
    let params: Params = match params {
        Some(p) => serde_json::from_str(&p)?,
        None => Params::default(),
    };

    // The search is unbounded, keep it off the async workers.
    let json = match web::block(move || prove(&formula, params)).await? {
        Ok(json) => json,
        Err(ProveErr::Parse(e)) => return Err(error::ErrorBadRequest(e)),
        Err(ProveErr::Resolution(e)) => return Err(error::ErrorInternalServerError(e)),
        Err(ProveErr::Json(e)) => return Err(e.into()),
    };

    Ok(HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(json))
}
