pub mod valve_service;
