/// Use cases module containing application business logic orchestration
mod show_repository_detail;

pub use show_repository_detail::ShowRepositoryDetailUseCase;
