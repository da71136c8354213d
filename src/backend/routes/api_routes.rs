/**
 * API Routes
 *
 * Auth routes are public. Every other route is added to a separate router
 * wrapped in `auth_middleware` with `route_layer`, so unmatched paths still
 * fall through to the 404 fallback instead of answering 401.
 */

use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};

use crate::backend::auth::{get_me, login, register};
use crate::backend::boards::handlers as boards;
use crate::backend::lists::handlers as lists;
use crate::backend::middleware::auth_middleware;
use crate::backend::server::state::AppState;
use crate::backend::tasks::handlers as tasks;
use crate::backend::users::handlers as users;

pub fn configure_public_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

pub fn configure_protected_routes(router: Router<AppState>, app_state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/auth/me", get(get_me))
        // Users
        .route("/users", get(users::list_users))
        .route("/users/me", get(users::current_user))
        .route(
            "/users/{id}",
            get(users::get_user)
                .patch(users::update_user)
                .delete(users::delete_user),
        )
        // Boards
        .route("/boards", post(boards::create_board).get(boards::search_boards))
        .route(
            "/boards/{id}",
            get(boards::get_board)
                .patch(boards::update_board)
                .delete(boards::delete_board),
        )
        .route("/boards/{id}/lists", get(boards::board_lists))
        // Lists
        .route("/lists", post(lists::create_list).get(lists::search_lists))
        .route(
            "/lists/{id}",
            get(lists::get_list)
                .patch(lists::update_list)
                .delete(lists::delete_list),
        )
        .route("/lists/{id}/move", patch(lists::move_list))
        // Tasks
        .route("/tasks", post(tasks::create_task).get(tasks::search_tasks))
        .route(
            "/tasks/{id}",
            get(tasks::get_task)
                .patch(tasks::update_task)
                .delete(tasks::delete_task),
        )
        .route("/tasks/{id}/move", patch(tasks::move_task))
        .route_layer(middleware::from_fn_with_state(app_state, auth_middleware));

    router.merge(protected)
}
