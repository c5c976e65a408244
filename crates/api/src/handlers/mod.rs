pub mod broken_car;
