mod config_test;
mod routes_test;
