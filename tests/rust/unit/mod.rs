mod motif_parser_tests;
mod plan_tests;
