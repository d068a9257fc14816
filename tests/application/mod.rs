mod conversation_service_test;
