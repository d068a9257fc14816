mod google_vision_client_test;
