use crate::state::AppState;
use axum::{
    Router,
    routing::{get, patch, post},
};

use super::controller::{
    activate_user, create_staff, create_teacher, deactivate_user, get_user_details, list_staff,
    list_teachers,
};

pub fn init_hr_router() -> Router<AppState> {
    Router::new()
        .route("/create-teacher", post(create_teacher))
        .route("/create-staff", post(create_staff))
        .route("/teachers", get(list_teachers))
        .route("/staff", get(list_staff))
        .route("/activate/{id}", patch(activate_user))
        .route("/deactivate/{id}", patch(deactivate_user))
        .route("/user/{id}", get(get_user_details))
}
