mod dataset;
mod dates;
mod decoder;
mod query_params;
