pub mod city_coordinate;
pub mod daily_record;
pub mod hourly_record;
pub mod weather_condition;
