use crate::data::boss::{load_boss_table, DEFAULT_BOSS_TABLE_PATH};
use crate::data::digimon::{load_roster, Digimon, DEFAULT_ROSTER_PATH};
use crate::evolution::{load_evolution_graph, DEFAULT_EVOLUTION_GRAPH_PATH};
use crate::server::api;

pub struct HttpResponse {
    pub status_code: u16,
    pub status_text: &'static str,
    pub content_type: &'static str,
    pub body: String,
}

impl HttpResponse {
    pub fn to_http_string(&self) -> String {
        format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            self.status_code,
            self.status_text,
            self.content_type,
            self.body.len(),
            self.body
        )
    }
}

fn load_roster_or_empty() -> Vec<Digimon> {
    load_roster(DEFAULT_ROSTER_PATH).unwrap_or_default()
}

pub fn route_request(method: &str, path: &str, body: &str) -> HttpResponse {
    match (method, path) {
        ("GET", "/") => HttpResponse {
            status_code: 200,
            status_text: "OK",
            content_type: "text/plain; charset=utf-8",
            body: usage_text(),
        },
        ("GET", "/api/health") => match api::health_payload() {
            Ok(payload) => json_ok(payload),
            Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
        },
        (method, path) if method == "GET" && path.starts_with("/api/digimon") => {
            match api::roster_payload(&load_roster_or_empty(), path) {
                Ok(payload) => json_ok(payload),
                Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
            }
        }
        ("GET", "/api/bosses") => {
            let table = load_boss_table(DEFAULT_BOSS_TABLE_PATH);
            match api::bosses_payload(table.as_ref()) {
                Ok(payload) => json_ok(payload),
                Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
            }
        }
        ("GET", "/api/availability") => {
            match api::availability_payload(&load_roster_or_empty()) {
                Ok(payload) => json_ok(payload),
                Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
            }
        }
        ("POST", "/api/randomize") => {
            match api::randomize_payload(&load_roster_or_empty(), body) {
                Ok(payload) => json_ok(payload),
                Err(api::ApiError::Parse(err)) => {
                    error_response(400, "Bad Request", &format!("Invalid request body: {err}"))
                }
                Err(api::ApiError::Validation(message)) => {
                    error_response(400, "Bad Request", &message)
                }
            }
        }
        (method, path) if method == "GET" && path.starts_with("/api/evolution") => {
            let graph = load_evolution_graph(DEFAULT_EVOLUTION_GRAPH_PATH).unwrap_or_default();
            match api::evolution_payload(&graph, path) {
                Ok(payload) => json_ok(payload),
                Err(api::ApiError::Validation(message)) => {
                    error_response(400, "Bad Request", &message)
                }
                Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
            }
        }
        ("POST", "/api/reroll") => match api::reroll_payload(&load_roster_or_empty(), body) {
            Ok(payload) => json_ok(payload),
            Err(api::ApiError::Parse(err)) => {
                error_response(400, "Bad Request", &format!("Invalid request body: {err}"))
            }
            Err(api::ApiError::Validation(message)) => {
                error_response(400, "Bad Request", &message)
            }
        },
        ("GET", _) | ("POST", _) => error_response(404, "Not Found", "Unknown route"),
        _ => error_response(405, "Method Not Allowed", "Unsupported method"),
    }
}

fn json_ok(payload: String) -> HttpResponse {
    HttpResponse {
        status_code: 200,
        status_text: "OK",
        content_type: "application/json",
        body: payload,
    }
}

fn error_response(status_code: u16, status_text: &'static str, message: &str) -> HttpResponse {
    let body = serde_json::json!({
        "status": "error",
        "message": message,
    });
    HttpResponse {
        status_code,
        status_text,
        content_type: "application/json",
        body: serde_json::to_string_pretty(&body)
            .unwrap_or_else(|_| format!("{{\"status\":\"error\",\"message\":\"{message}\"}}")),
    }
}

fn usage_text() -> String {
    [
        "tamer api",
        "",
        "GET  /api/health",
        "GET  /api/digimon[?available_at=N]",
        "GET  /api/bosses",
        "GET  /api/availability",
        "GET  /api/evolution?from=A&to=B",
        "POST /api/randomize",
        "POST /api/reroll",
        "",
    ]
    .join("\n")
}
