pub mod evaluate {
    pub mod evaluate_request;
    pub mod evaluate_route;
}

pub mod notes {
    pub mod notes_request;
    pub mod notes_route;
}

pub mod solution {
    pub mod solution_request;
    pub mod solution_route;
}

pub mod tutor {
    pub mod tutor_request;
    pub mod tutor_route;
}

pub mod health_route;
