mod color_registry_test;
mod dashboard_service_test;
mod periodic_task_test;
