use crate::app::PortalApp;
use crate::catalog::disclosure::GLOBAL_KEY;
use crate::catalog::{Action, AgencyFilter, SearchQuery, SectionId};
use crate::errors::ServerError;
use crate::responses::{html_response, json_response, redirect, ResultResp};
use crate::templates::pages::{self, search::SearchVm};
use astra::Request;
use serde_json::json;

pub fn handle(req: Request, app: &PortalApp) -> ResultResp {
    if req.method() != "GET" {
        return Err(ServerError::NotFound);
    }

    let params = parse_query(&req);
    let back = referer(&req);
    let path = req.uri().path();
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

    match segments.as_slice() {
        [""] => app.with_portal(|p| pages::home_page(p)).and_then(html_response),
        ["health"] => json_response(&json!({
            "status": "ok",
            "pendingFetches": app.pending_fetches(),
        })),
        ["refresh"] => {
            app.refresh(&SectionId::HOME)?;
            redirect("/")
        }

        ["sections", slug] => {
            let id = section(slug)?;
            app.with_portal(|p| pages::section_page(&p.view(id), p.selection()))
                .and_then(html_response)
        }
        ["api", "sections", slug] => {
            let id = section(slug)?;
            let body = app.with_portal(|p| serde_json::to_value(p.view(id)))?;
            json_response(&body.map_err(|_| ServerError::InternalError)?)
        }
        ["sections", slug, "more"] => {
            let id = section(slug)?;
            let key = param(&params, "group").unwrap_or(GLOBAL_KEY).to_string();
            app.apply(Action::ShowMore(id, key))?;
            redirect(back.as_deref().unwrap_or(&format!("/sections/{slug}")))
        }
        ["sections", slug, "agency"] => {
            let id = section(slug)?;
            let filter = AgencyFilter::parse(param(&params, "value").unwrap_or("all"));
            app.apply(Action::FilterAgency(id, filter))?;
            redirect(back.as_deref().unwrap_or(&format!("/sections/{slug}")))
        }
        ["sections", slug, "carousel"] => {
            let id = section(slug)?;
            let action = match param(&params, "dir") {
                Some("prev") => Action::CarouselPrev(id),
                Some("next") | None => Action::CarouselNext(id),
                Some(other) => {
                    return Err(ServerError::BadRequest(format!("unknown direction {other}")))
                }
            };
            app.apply(action)?;
            redirect(back.as_deref().unwrap_or("/"))
        }

        ["listings", "gallery"] => {
            let index = param(&params, "index")
                .and_then(|i| i.parse::<usize>().ok())
                .ok_or_else(|| ServerError::BadRequest("index must be a number".into()))?;
            app.apply(Action::SelectImage(index))?;
            redirect(back.as_deref().unwrap_or("/"))
        }
        ["listings", slug, id] => {
            let section_id = section(slug)?;
            app.apply(Action::Open(section_id, id.to_string()))?;
            redirect(back.as_deref().unwrap_or(&format!("/sections/{slug}")))
        }
        ["close"] => {
            app.apply(Action::Close)?;
            redirect(back.as_deref().unwrap_or("/"))
        }

        ["search"] => {
            let query = SearchQuery::from_pairs(params);
            let summary = app.search(&query)?;
            let options = app.filter_options();
            app.with_portal(|p| {
                pages::search_page(&SearchVm {
                    query: &query,
                    summary: &summary,
                    view: p.view(SectionId::RentalSearch),
                    options: options.as_ref(),
                    selection: p.selection(),
                })
            })
            .and_then(html_response)
        }
        ["api", "search", "options"] => app
            .filter_options()
            .ok_or_else(|| ServerError::Upstream("filter options unavailable".into()))
            .and_then(|v| json_response(&v)),
        ["api", "stats"] => app
            .stats()
            .ok_or_else(|| ServerError::Upstream("stats unavailable".into()))
            .and_then(|v| json_response(&v)),

        _ => Err(ServerError::NotFound),
    }
}

fn section(slug: &str) -> Result<SectionId, ServerError> {
    SectionId::from_slug(slug).ok_or(ServerError::NotFound)
}

fn param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// Same-site pages only; anything else falls back to the route default.
fn referer(req: &Request) -> Option<String> {
    let value = req.headers().get("Referer")?.to_str().ok()?;
    let url = url::Url::parse(value).ok()?;
    let host = req.headers().get("Host").and_then(|h| h.to_str().ok())?;

    let same_host = match url.port() {
        Some(port) => format!("{}:{port}", url.host_str()?) == host,
        None => url.host_str() == Some(host),
    };
    if !same_host {
        return None;
    }

    Some(match url.query() {
        Some(q) => format!("{}?{q}", url.path()),
        None => url.path().to_string(),
    })
}

fn parse_query(req: &Request) -> Vec<(String, String)> {
    req.uri()
        .query()
        .map(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .into_owned()
                .collect()
        })
        .unwrap_or_default()
}
