//! OpenApi metadata for the aide-documented routes

use aide::transform::TransformOpenApi;

pub fn api_docs(api: TransformOpenApi) -> TransformOpenApi {
    api.title("playhub backend")
        .summary("Activity feeds and level leaderboards")
        .description(
            "Read-side API over the event log: visibility-filtered, grouped \
             activity pages with backward pagination, plus tie-aware score \
             leaderboards.",
        )
}
