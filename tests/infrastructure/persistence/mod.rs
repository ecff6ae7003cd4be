mod in_memory_repository_test;
