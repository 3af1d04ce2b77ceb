mod property_text;
mod scenarios;
