use postgres_unit_of_work::Executor;

pub struct UserRoleRepositoryImpl {
    pub executor: Executor,
}

impl UserRoleRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}
