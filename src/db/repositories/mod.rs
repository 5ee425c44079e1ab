pub mod settings_repository;
