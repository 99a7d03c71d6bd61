mod deferred_queries_tests;
