/// StateHandler keeps track of the route of a single car: its assigned start and end location,
/// its current location and the locations visited so far (in driving order, start included).
#[derive(Debug, Clone)]
pub struct StateHandler {
    start: usize,
    end: usize,
    cur_location: usize,
    route: Vec<usize>,
}

impl StateHandler {
    pub fn new(start: usize, end: usize) -> StateHandler {
        StateHandler {
            start,
            end,
            cur_location: start,
            route: vec![start],
        }
    }

    pub fn get_start(&self) -> usize {
        self.start
    }

    pub fn get_end(&self) -> usize {
        self.end
    }

    pub fn get_cur_location(&self) -> usize {
        self.cur_location
    }

    /// get_route returns the visited locations in the order they were visited.
    pub fn get_route(&self) -> &[usize] {
        &self.route
    }

    pub fn get_no_visited(&self) -> usize {
        self.route.len()
    }

    pub fn has_visited(&self, location_id: usize) -> bool {
        self.route.contains(&location_id)
    }

    /// get_end_reachable returns true if visiting the end location would complete the route,
    /// i.e., all other locations were visited.
    pub fn get_end_reachable(&self, no_locations: usize) -> bool {
        self.route.len() + 1 >= no_locations
    }

    /// get_finished returns true if the car has visited every location.
    pub fn get_finished(&self, no_locations: usize) -> bool {
        self.route.len() == no_locations
    }

    /// visit moves the car to the given location. The caller has to make sure the location was not
    /// visited before.
    pub fn visit(&mut self, location_id: usize) {
        if self.has_visited(location_id) {
            panic!(
                "Tried to visit location {} which is already part of the route!",
                location_id
            )
        }

        self.route.push(location_id);
        self.cur_location = location_id;
    }
}
