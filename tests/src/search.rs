mod coverage;
mod end_to_end;
