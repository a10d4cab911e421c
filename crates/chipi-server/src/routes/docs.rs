//! Static API documentation.

use axum::Json;
use serde::Serialize;

use super::ResponseStatus;

#[derive(Debug, Serialize)]
pub struct EndpointDoc {
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
    #[serde(skip_serializing_if = "no_fields")]
    pub body: &'static [FieldDoc],
}

fn no_fields(fields: &&'static [FieldDoc]) -> bool {
    fields.is_empty()
}

#[derive(Debug, Serialize)]
pub struct FieldDoc {
    pub name: &'static str,
    pub required: bool,
    pub description: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DocsResponse {
    pub status: ResponseStatus,
    pub endpoints: &'static [EndpointDoc],
}

const RESPONSE_FIELD: &[FieldDoc] = &[FieldDoc {
    name: "response",
    required: true,
    description: "Response text",
}];

const ENDPOINTS: &[EndpointDoc] = &[
    EndpointDoc {
        method: "GET",
        path: "/api/data",
        description: "Get all training data",
        body: &[],
    },
    EndpointDoc {
        method: "GET",
        path: "/api/data/{category}",
        description: "Get a specific category",
        body: &[],
    },
    EndpointDoc {
        method: "POST",
        path: "/api/data/add-response/{category}",
        description: "Add a new response to a category",
        body: RESPONSE_FIELD,
    },
    EndpointDoc {
        method: "POST",
        path: "/api/data/add-pattern/{category}",
        description: "Add a new pattern to a category",
        body: &[FieldDoc {
            name: "pattern",
            required: true,
            description: "Trigger phrase, unique within the category",
        }],
    },
    EndpointDoc {
        method: "POST",
        path: "/api/data/create-category",
        description: "Create a new category",
        body: &[
            FieldDoc {
                name: "name",
                required: true,
                description: "Category name",
            },
            FieldDoc {
                name: "patterns",
                required: false,
                description: "Initial patterns (default empty)",
            },
            FieldDoc {
                name: "responses",
                required: false,
                description: "Initial responses (default empty)",
            },
        ],
    },
    EndpointDoc {
        method: "PUT",
        path: "/api/data/update-response/{category}/{index}",
        description: "Replace the response at a 0-based index",
        body: RESPONSE_FIELD,
    },
    EndpointDoc {
        method: "DELETE",
        path: "/api/data/delete-response/{category}/{index}",
        description: "Delete the response at a 0-based index",
        body: &[],
    },
    EndpointDoc {
        method: "DELETE",
        path: "/api/data/delete-category/{category}",
        description: "Delete a category (greetings, help and goodbye are protected)",
        body: &[],
    },
    EndpointDoc {
        method: "POST",
        path: "/api/data/reset",
        description: "Reset to default training data",
        body: &[],
    },
    EndpointDoc {
        method: "GET",
        path: "/api/stats",
        description: "Get statistics about the training data",
        body: &[],
    },
    EndpointDoc {
        method: "GET",
        path: "/api/health",
        description: "Health check",
        body: &[],
    },
    EndpointDoc {
        method: "GET",
        path: "/api/docs",
        description: "This document",
        body: &[],
    },
];

/// List every endpoint with its body fields.
/// GET /api/docs
pub async fn api_docs() -> Json<DocsResponse> {
    Json(DocsResponse {
        status: ResponseStatus::Success,
        endpoints: ENDPOINTS,
    })
}
