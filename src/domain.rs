pub mod city;
pub mod weather;
