use crate::modules::users::controller::{get_user, get_user_by_email, get_users, register_user};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_user))
        .route("/getUsers", get(get_users))
        .route("/getUser/{id}", get(get_user))
        .route("/email/{email}", get(get_user_by_email))
}
