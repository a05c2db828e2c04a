
/// Entity-level CRUD and validation tests
pub mod crud_tests;
