//! HTTP handler functions for the shoreline API.

use actix_web::{Either, HttpResponse, web};
use shoreline_contribution_models::decode_contribution;
use shoreline_debris::DebrisError;
use shoreline_debris::date_range::parse_report_date;
use shoreline_debris::reports;
use shoreline_debris_models::ReportQuery;
use shoreline_location_models::LocationCategory;
use shoreline_server_models::{
    ApiError, ApiHealth, BreakdownResponse, DirtyDozenResponse, LocationQueryParams,
    LocationsHierarchyResponse, LocationsResponse, ReportQueryParams, TeamCaptainsResponse,
    TrashItemsResponse, ValidDateRangeResponse,
};

use crate::config::ServerConfig;
use crate::{AppState, ROUTES};

/// Resolves report parameters against the configured defaults.
///
/// A missing `endDate` means today.
fn report_query(
    config: &ServerConfig,
    params: &ReportQueryParams,
) -> Result<ReportQuery, DebrisError> {
    let start_date = match params.start_date.as_deref() {
        Some(raw) => parse_report_date(raw)?,
        None => config.default_start_date,
    };
    let end_date = match params.end_date.as_deref() {
        Some(raw) => parse_report_date(raw)?,
        None => chrono::Local::now().date_naive(),
    };

    Ok(ReportQuery {
        location_category: LocationCategory::normalize_opt(params.location_category.as_deref()),
        location_name: params
            .location_name
            .clone()
            .unwrap_or_else(|| config.default_location_name.clone()),
        start_date,
        end_date,
    })
}

fn error_response(context: &str, e: &DebrisError) -> HttpResponse {
    if e.is_client_error() {
        log::warn!("{context}: {e}");
        HttpResponse::BadRequest().json(ApiError {
            error: e.to_string(),
        })
    } else {
        log::error!("{context}: {e}");
        HttpResponse::InternalServerError().json(ApiError {
            error: context.to_string(),
        })
    }
}

/// Form-encoded contribution body. The legacy entry page posts the
/// delimited string as the name of the first form field.
type ContributionForm = web::Form<Vec<(String, String)>>;

fn contribution_body(body: Either<ContributionForm, String>) -> String {
    match body {
        Either::Left(form) => form
            .into_inner()
            .into_iter()
            .next()
            .map(|(name, _)| name)
            .unwrap_or_default(),
        Either::Right(raw) => raw,
    }
}

/// `GET /`
///
/// Lists the served routes.
pub async fn index() -> HttpResponse {
    HttpResponse::Ok().json(ROUTES)
}

/// `GET /health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /locations`
pub async fn locations(state: web::Data<AppState>) -> HttpResponse {
    match reports::all_locations_list(state.source.as_ref()).await {
        Ok(locations) => HttpResponse::Ok().json(LocationsResponse { locations }),
        Err(e) => error_response("Failed to list locations", &e),
    }
}

/// `GET /locationsHierarchy`
pub async fn locations_hierarchy(state: web::Data<AppState>) -> HttpResponse {
    match reports::locations_hierarchy(state.source.as_ref()).await {
        Ok(locations_hierarchy) => HttpResponse::Ok().json(LocationsHierarchyResponse {
            locations_hierarchy,
        }),
        Err(e) => error_response("Failed to build location hierarchy", &e),
    }
}

/// `GET /dirtydozen`
///
/// Returns the twelve most collected items at a location.
pub async fn dirty_dozen(
    state: web::Data<AppState>,
    params: web::Query<ReportQueryParams>,
) -> HttpResponse {
    let query = match report_query(&state.config, &params) {
        Ok(q) => q,
        Err(e) => return error_response("Invalid dirty dozen query", &e),
    };

    match reports::dirty_dozen(state.source.as_ref(), &query).await {
        Ok(dirtydozen) => HttpResponse::Ok().json(DirtyDozenResponse { dirtydozen }),
        Err(e) => error_response("Failed to compute dirty dozen", &e),
    }
}

/// `GET /breakdown`
///
/// Returns the material/category/item sunburst tree.
pub async fn breakdown(
    state: web::Data<AppState>,
    params: web::Query<ReportQueryParams>,
) -> HttpResponse {
    let query = match report_query(&state.config, &params) {
        Ok(q) => q,
        Err(e) => return error_response("Invalid breakdown query", &e),
    };

    match reports::breakdown(state.source.as_ref(), &query).await {
        Ok(data) => HttpResponse::Ok().json(BreakdownResponse { data }),
        Err(e) => error_response("Failed to compute breakdown", &e),
    }
}

/// `GET /validdaterange`
pub async fn valid_date_range(
    state: web::Data<AppState>,
    params: web::Query<LocationQueryParams>,
) -> HttpResponse {
    let category = LocationCategory::normalize_opt(params.location_category.as_deref());
    let location_name = params
        .location_name
        .as_deref()
        .unwrap_or(&state.config.default_location_name);

    match reports::valid_date_range(state.source.as_ref(), category, location_name).await {
        Ok(valid_date_range) => {
            HttpResponse::Ok().json(ValidDateRangeResponse { valid_date_range })
        }
        Err(e) => error_response("Failed to look up date range", &e),
    }
}

/// `GET /getTLs`
pub async fn team_captains(state: web::Data<AppState>) -> HttpResponse {
    match reports::team_captains(state.source.as_ref()).await {
        Ok(team_captains) => HttpResponse::Ok().json(TeamCaptainsResponse { team_captains }),
        Err(e) => error_response("Failed to list team captains", &e),
    }
}

/// `GET /getTrashItems`
pub async fn trash_items(state: web::Data<AppState>) -> HttpResponse {
    match reports::trash_items(state.source.as_ref()).await {
        Ok(trash_items) => HttpResponse::Ok().json(TrashItemsResponse { trash_items }),
        Err(e) => error_response("Failed to list trash items", &e),
    }
}

/// `POST /insertContribution`
///
/// Accepts a JSON contribution or the legacy `team----items` string,
/// either as the raw body or form-encoded, and stores it in one
/// transaction. Responds `{}` on success.
pub async fn insert_contribution(
    state: web::Data<AppState>,
    body: Either<ContributionForm, String>,
) -> HttpResponse {
    let contribution = match decode_contribution(&contribution_body(body)) {
        Ok(c) => c,
        Err(e) => return error_response("Rejected contribution", &DebrisError::from(e)),
    };

    match reports::submit_contribution(state.source.as_ref(), &contribution).await {
        Ok(team_id) => {
            log::debug!("Contribution accepted as team {team_id}");
            HttpResponse::Ok().json(serde_json::json!({}))
        }
        Err(e) => error_response("Failed to insert contribution", &e),
    }
}
